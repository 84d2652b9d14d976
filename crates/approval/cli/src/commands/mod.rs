//! CLI command implementations

pub mod condition;
pub mod instantiate;
pub mod templates;
pub mod validate;

use crate::error::{CliError, CliResult};
use approval_condition::Context;
use std::path::Path;

/// Parse a context from inline JSON or a JSON/YAML file
pub(crate) fn load_context(inline: Option<&str>, file: Option<&Path>) -> CliResult<Context> {
    match (inline, file) {
        (Some(_), Some(_)) => Err(CliError::InvalidArgument(
            "use either --context or --context-file, not both".to_string(),
        )),
        (Some(json), None) => Ok(serde_json::from_str(json)?),
        (None, Some(path)) => {
            let contents = std::fs::read_to_string(path)?;
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                Ok(serde_json::from_str(&contents)?)
            } else {
                Ok(serde_yaml::from_str(&contents)?)
            }
        }
        (None, None) => Ok(Context::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approval_condition::Value;
    use std::io::Write;

    #[test]
    fn test_load_inline_context() {
        let ctx = load_context(Some(r#"{"amount": 5000, "urgency": "low", "vip": true}"#), None)
            .unwrap();
        assert_eq!(ctx.get("amount"), Some(&Value::Number(5000.0)));
        assert_eq!(ctx.get("urgency"), Some(&Value::from("low")));
        assert_eq!(ctx.get("vip"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_load_yaml_context_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "days: 7\nurgency: critical").unwrap();

        let ctx = load_context(None, Some(file.path())).unwrap();
        assert_eq!(ctx.get("days"), Some(&Value::Number(7.0)));
        assert_eq!(ctx.get("urgency"), Some(&Value::from("critical")));
    }

    #[test]
    fn test_load_context_rejects_nested_values() {
        assert!(load_context(Some(r#"{"order": {"amount": 1}}"#), None).is_err());
        assert!(load_context(Some("[1, 2]"), None).is_err());
    }

    #[test]
    fn test_load_context_defaults_to_empty() {
        assert!(load_context(None, None).unwrap().is_empty());
    }
}
