//! Condition checking commands

use crate::commands::load_context;
use crate::error::CliResult;
use crate::output::{print_single, print_success, print_warning, OutputFormat};
use approval_condition::Condition;
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Condition subcommands
#[derive(Subcommand)]
pub enum ConditionCommands {
    /// Parse a condition, list its variables and optionally evaluate it
    Check {
        /// Condition text, e.g. 'amount > 10000'
        expression: String,

        /// Context to evaluate against, as a JSON object
        #[arg(short = 'x', long)]
        context: Option<String>,

        /// Read the context from a JSON or YAML file
        #[arg(short = 'f', long)]
        context_file: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConditionReport {
    expression: String,
    variables: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute condition command
pub fn execute(command: ConditionCommands, format: OutputFormat) -> CliResult<()> {
    match command {
        ConditionCommands::Check {
            expression,
            context,
            context_file,
        } => check_condition(&expression, context.as_deref(), context_file, format),
    }
}

fn check_condition(
    expression: &str,
    context: Option<&str>,
    context_file: Option<PathBuf>,
    format: OutputFormat,
) -> CliResult<()> {
    let condition = Condition::parse(expression)?;
    let evaluate = context.is_some() || context_file.is_some();

    let mut report = ConditionReport {
        expression: expression.to_string(),
        variables: condition.variables().into_iter().map(String::from).collect(),
        result: None,
        error: None,
    };

    if evaluate {
        let ctx = load_context(context, context_file.as_deref())?;
        match condition.evaluate(&ctx) {
            Ok(result) => report.result = Some(result),
            Err(err) => {
                // An engine would exclude the step
                report.result = Some(false);
                report.error = Some(err.to_string());
            }
        }
    }

    if format != OutputFormat::Table {
        return print_single(&report, format);
    }

    print_success(&format!("Condition parses: {}", expression.bold()));
    if report.variables.is_empty() {
        println!("  Variables: {}", "none".dimmed());
    } else {
        println!("  Variables: {}", report.variables.join(", "));
    }
    match (&report.result, &report.error) {
        (Some(_), Some(error)) => {
            print_warning(&format!("Evaluation failed ({error}); step would be excluded"))
        }
        (Some(true), None) => println!("  Result:    {}", "true".green()),
        (Some(false), None) => println!("  Result:    {}", "false".red()),
        _ => {}
    }
    Ok(())
}
