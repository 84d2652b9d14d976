//! Template inspection commands

use crate::error::CliResult;
use crate::output::{cell, print_info, print_single, print_table, OutputFormat};
use approval_engine::TemplateService;
use approval_types::{TemplateId, WorkflowTemplate, WorkflowTemplateStep};
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List active templates
    List {
        /// Only templates in this category (exact match)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show a template and its steps
    Show {
        /// Template ID
        id: String,
    },
}

/// Table row for template listings
#[derive(Debug, Serialize, Tabled)]
struct TemplateRow {
    id: String,
    name: String,
    category: String,
    #[tabled(rename = "type")]
    workflow_type: String,
    steps: usize,
    active: bool,
    updated: String,
}

impl From<&WorkflowTemplate> for TemplateRow {
    fn from(template: &WorkflowTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.clone(),
            category: template.category.clone(),
            workflow_type: template.workflow_type.to_string(),
            steps: template.steps.len(),
            active: template.is_active,
            updated: template.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Table row for template steps
#[derive(Debug, Serialize, Tabled)]
struct StepRow {
    step: u32,
    name: String,
    role: String,
    approver: String,
    condition: String,
    #[tabled(rename = "sla (h)")]
    sla_hours: String,
}

impl From<&WorkflowTemplateStep> for StepRow {
    fn from(step: &WorkflowTemplateStep) -> Self {
        Self {
            step: step.step_number,
            name: step.name.clone(),
            role: cell(step.approver_role.as_deref()),
            approver: cell(step.approver_id.as_deref()),
            condition: cell(step.active_condition()),
            sla_hours: cell(step.sla_hours),
        }
    }
}

/// Execute template command
pub fn execute(
    command: TemplateCommands,
    service: &TemplateService,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        TemplateCommands::List { category } => {
            list_templates(service, category.as_deref(), format)
        }
        TemplateCommands::Show { id } => show_template(service, &TemplateId::new(id), format),
    }
}

fn list_templates(
    service: &TemplateService,
    category: Option<&str>,
    format: OutputFormat,
) -> CliResult<()> {
    let templates = match category {
        Some(category) => service.list_templates_by_category(category)?,
        None => service.list_templates()?,
    };

    match format {
        OutputFormat::Table => print_table(templates.iter().map(TemplateRow::from).collect()),
        _ => print_single(&templates, format)?,
    }
    Ok(())
}

fn show_template(
    service: &TemplateService,
    id: &TemplateId,
    format: OutputFormat,
) -> CliResult<()> {
    let template = service.get_template(id)?;

    if format != OutputFormat::Table {
        return print_single(&template, format);
    }

    println!("{}", template.name.bold().cyan());
    println!("{}", "=".repeat(70));
    println!("  {:<12} {}", "ID:".bold(), template.id);
    println!("  {:<12} {}", "Category:".bold(), template.category);
    println!("  {:<12} {}", "Type:".bold(), template.workflow_type);
    println!(
        "  {:<12} {}",
        "Status:".bold(),
        if template.is_active {
            "active".green()
        } else {
            "inactive".red()
        }
    );
    if !template.description.is_empty() {
        println!("  {:<12} {}", "Description:".bold(), template.description);
    }
    println!();

    if template.steps.is_empty() {
        print_info("Template has no steps");
    } else {
        print_table(template.steps.iter().map(StepRow::from).collect());
    }
    Ok(())
}
