//! Template file validation

use crate::error::{CliError, CliResult};
use crate::output::{print_single, print_success, print_table, print_warning, OutputFormat};
use approval_engine::{diagnose_steps, load_template_file};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

/// One problem found in a template file
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct Problem {
    template: String,
    step: String,
    problem: String,
}

/// Execute validate command
///
/// Fails when the file does not load or any template has a problem.
pub fn execute(file: &Path, format: OutputFormat) -> CliResult<()> {
    let templates = load_template_file(file)?;
    let mut problems = Vec::new();

    for (index, template) in templates.iter().enumerate() {
        let label = template
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("#{} {}", index + 1, template.name));

        if let Err(err) = template.validate() {
            problems.push(Problem {
                template: label.clone(),
                step: "-".to_string(),
                problem: err.to_string(),
            });
        }

        for diagnostic in diagnose_steps(&template.steps) {
            problems.push(Problem {
                template: label.clone(),
                step: diagnostic.step_number.to_string(),
                problem: format!(
                    "condition '{}' does not parse: {}",
                    diagnostic.expression, diagnostic.error
                ),
            });
        }
    }

    tracing::debug!(
        file = %file.display(),
        templates = templates.len(),
        problems = problems.len(),
        "Validated template file"
    );

    let count = problems.len();
    match format {
        OutputFormat::Table => {
            if problems.is_empty() {
                print_success(&format!(
                    "{} template(s) in {} are valid",
                    templates.len(),
                    file.display()
                ));
            } else {
                print_warning(&format!("{} problem(s) in {}", count, file.display()));
                print_table(problems);
            }
        }
        _ => print_single(&problems, format)?,
    }

    if count > 0 {
        return Err(CliError::ValidationFailed(count));
    }
    Ok(())
}
