//! Instantiation command

use crate::commands::load_context;
use crate::error::CliResult;
use crate::output::{cell, print_info, print_single, print_table, OutputFormat};
use approval_engine::TemplateService;
use approval_types::{InstantiatedStep, TemplateId};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

/// Arguments for `instantiate`
#[derive(Args)]
pub struct InstantiateArgs {
    /// Template ID
    pub id: String,

    /// Transaction context as a JSON object, e.g. '{"amount": 50000}'
    #[arg(short = 'x', long)]
    pub context: Option<String>,

    /// Read the context from a JSON or YAML file
    #[arg(short = 'f', long)]
    pub context_file: Option<PathBuf>,
}

/// Table row for instantiated steps
#[derive(Debug, Serialize, Tabled)]
struct InstantiatedRow {
    step: u32,
    role: String,
    approver: String,
    #[tabled(rename = "sla (h)")]
    sla_hours: String,
}

impl From<&InstantiatedStep> for InstantiatedRow {
    fn from(step: &InstantiatedStep) -> Self {
        Self {
            step: step.step_number,
            role: step.approver_role.clone(),
            approver: cell(step.approver_id.as_deref()),
            sla_hours: cell(step.sla_hours),
        }
    }
}

/// Execute instantiate command
pub fn execute(
    args: InstantiateArgs,
    service: &TemplateService,
    format: OutputFormat,
) -> CliResult<()> {
    let context = load_context(args.context.as_deref(), args.context_file.as_deref())?;
    let id = TemplateId::new(args.id);
    let workflow = service.instantiate_template(&id, &context)?;

    if format != OutputFormat::Table {
        return print_single(&workflow, format);
    }

    println!(
        "{} {} ({})",
        "Workflow".bold().cyan(),
        id.to_string().bold(),
        workflow.workflow_type
    );
    if workflow.is_empty() {
        print_info("No approval steps apply to this context");
    } else {
        print_table(workflow.steps.iter().map(InstantiatedRow::from).collect());
    }
    Ok(())
}
