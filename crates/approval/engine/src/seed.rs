//! Seed templates loaded at startup
//!
//! Seeds are plain configuration data: the built-in set below, plus any
//! template files named in [`SeedConfig`]. Files hold a YAML or JSON list
//! of templates in the same shape accepted by `create`.

use crate::config::SeedConfig;
use crate::store::TemplateStore;
use approval_types::{ApprovalError, NewTemplate, WorkflowTemplateStep, WorkflowType};
use std::path::{Path, PathBuf};

/// Errors raised while loading seed templates
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in seed file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid JSON in seed file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Approval(#[from] ApprovalError),
}

pub type SeedResult<T> = Result<T, SeedError>;

/// The built-in approval templates
pub fn builtin_templates() -> Vec<NewTemplate> {
    vec![
        NewTemplate::new("Purchase Requisition Approval", "Procurement")
            .with_id("pr-approval")
            .with_description("Approval chain for purchase requisitions, escalating with amount")
            .with_step(
                WorkflowTemplateStep::new(1, "Department Head Approval")
                    .with_role("DEPARTMENT_HEAD")
                    .with_action("approve")
                    .with_action("reject")
                    .with_sla_hours(24.0),
            )
            .with_step(
                WorkflowTemplateStep::new(2, "Finance Manager Approval")
                    .with_role("FINANCE_MANAGER")
                    .with_condition("amount > 10000")
                    .with_action("approve")
                    .with_action("reject")
                    .with_sla_hours(48.0),
            )
            .with_step(
                WorkflowTemplateStep::new(3, "CEO Approval")
                    .with_role("CEO")
                    .with_condition("amount > 100000")
                    .with_action("approve")
                    .with_action("reject")
                    .with_sla_hours(72.0),
            ),
        NewTemplate::new("Leave Request Approval", "HR")
            .with_id("leave-approval")
            .with_description("Leave requests, with HR sign-off for longer absences")
            .with_step(
                WorkflowTemplateStep::new(1, "Reporting Manager Approval")
                    .with_role("REPORTING_MANAGER")
                    .with_action("approve")
                    .with_action("reject")
                    .with_sla_hours(24.0),
            )
            .with_step(
                WorkflowTemplateStep::new(2, "HR Manager Approval")
                    .with_role("HR_MANAGER")
                    .with_condition("days > 5")
                    .with_action("approve")
                    .with_action("reject")
                    .with_sla_hours(48.0),
            ),
        NewTemplate::new("Sales Order Approval", "Sales")
            .with_id("sales-order-approval")
            .with_description("Sales orders, with operations review for critical deliveries")
            .with_type(WorkflowType::Conditional)
            .with_step(
                WorkflowTemplateStep::new(1, "Sales Manager Approval")
                    .with_role("SALES_MANAGER")
                    .with_action("approve")
                    .with_action("reject")
                    .with_sla_hours(12.0),
            )
            .with_step(
                WorkflowTemplateStep::new(2, "Operations Head Approval")
                    .with_role("OPERATIONS_HEAD")
                    .with_condition(r#"urgency === "critical""#)
                    .with_action("approve")
                    .with_action("reject")
                    .with_sla_hours(4.0),
            ),
        NewTemplate::new("Capital Expenditure Approval", "Finance")
            .with_id("capex-approval")
            .with_description("Capital expenditure, with board review above the budget threshold")
            .with_type(WorkflowType::Parallel)
            .with_step(
                WorkflowTemplateStep::new(1, "Finance Controller Approval")
                    .with_role("FINANCE_CONTROLLER")
                    .with_action("approve")
                    .with_action("reject")
                    .with_sla_hours(48.0),
            )
            .with_step(
                WorkflowTemplateStep::new(2, "Board Approval")
                    .with_role("BOARD")
                    .with_condition("budget > 500000")
                    .with_action("approve")
                    .with_action("reject")
                    .with_sla_hours(168.0),
            ),
    ]
}

/// Read templates from a YAML or JSON file
///
/// `.json` files are parsed as JSON, everything else as YAML.
pub fn load_template_file(path: &Path) -> SeedResult<Vec<NewTemplate>> {
    let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&contents).map_err(|source| SeedError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(&contents).map_err(|source| SeedError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Populate a store from the configured seed sources
///
/// Returns the number of templates created. Any invalid or duplicate
/// template aborts seeding.
pub fn seed_store<S: TemplateStore + ?Sized>(store: &S, config: &SeedConfig) -> SeedResult<usize> {
    let mut created = 0;

    if config.builtin {
        for template in builtin_templates() {
            store.create(template)?;
            created += 1;
        }
    }

    for path in &config.files {
        let templates = load_template_file(path)?;
        tracing::info!(
            path = %path.display(),
            templates = templates.len(),
            "Loading seed template file"
        );
        for template in templates {
            store.create(template)?;
            created += 1;
        }
    }

    tracing::info!(templates = created, "Seed templates loaded");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryTemplateStore;
    use approval_condition::Condition;
    use std::io::Write;

    #[test]
    fn test_builtin_templates_are_valid() {
        let templates = builtin_templates();
        assert_eq!(templates.len(), 4);

        for template in &templates {
            template.validate().unwrap();
            for step in &template.steps {
                if let Some(condition) = step.active_condition() {
                    Condition::parse(condition).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_seed_builtin() {
        let store = InMemoryTemplateStore::new();
        let created = seed_store(&store, &SeedConfig::default()).unwrap();

        assert_eq!(created, 4);
        assert_eq!(store.list_by_category("Procurement").unwrap().len(), 1);
        assert!(store.contains(&"pr-approval".into()).unwrap());
    }

    #[test]
    fn test_seed_disabled() {
        let store = InMemoryTemplateStore::new();
        let config = SeedConfig {
            builtin: false,
            files: Vec::new(),
        };
        assert_eq!(seed_store(&store, &config).unwrap(), 0);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_seed_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            r#"
- id: travel-approval
  name: Travel Request Approval
  category: Travel
  type: sequential
  steps:
    - stepNumber: 1
      name: Manager
      approverRole: MANAGER
    - stepNumber: 2
      name: Travel Desk
      condition: "international == true"
"#
        )
        .unwrap();

        let store = InMemoryTemplateStore::new();
        let config = SeedConfig {
            builtin: true,
            files: vec![file.path().to_path_buf()],
        };
        assert_eq!(seed_store(&store, &config).unwrap(), 5);

        let travel = store.get(&"travel-approval".into()).unwrap();
        assert!(travel.is_active);
        assert_eq!(travel.steps.len(), 2);
        assert_eq!(
            travel.steps[1].condition.as_deref(),
            Some("international == true")
        );
    }

    #[test]
    fn test_seed_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"name": "Expense Claim", "category": "Finance",
                "steps": [{{"stepNumber": 1, "name": "Manager"}}]}}]"#
        )
        .unwrap();

        let templates = load_template_file(file.path()).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Expense Claim");
    }

    #[test]
    fn test_seed_file_errors() {
        let missing = load_template_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(missing, SeedError::Io { .. }));

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            load_template_file(file.path()).unwrap_err(),
            SeedError::Json { .. }
        ));
    }

    #[test]
    fn test_seed_duplicate_id_aborts() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "- id: pr-approval\n  name: Shadow\n").unwrap();

        let store = InMemoryTemplateStore::new();
        let config = SeedConfig {
            builtin: true,
            files: vec![file.path().to_path_buf()],
        };
        let err = seed_store(&store, &config).unwrap_err();
        assert!(matches!(
            err,
            SeedError::Approval(ApprovalError::AlreadyExists(_))
        ));
    }
}
