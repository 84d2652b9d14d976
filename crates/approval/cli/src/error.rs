//! CLI error types

use approval_condition::ConditionError;
use approval_engine::SeedError;
use approval_types::ApprovalError;
use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Approval(#[from] ApprovalError),

    #[error("{0}")]
    Seed(#[from] SeedError),

    #[error("Invalid condition: {0}")]
    Condition(#[from] ConditionError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed with {0} problem(s)")]
    ValidationFailed(usize),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
