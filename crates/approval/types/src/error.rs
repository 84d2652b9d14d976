//! Approval workflow error taxonomy

use crate::TemplateId;
use approval_condition::ConditionError;

/// Errors raised by template management and instantiation
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    /// No template with the requested id exists
    #[error("Workflow template not found: {0}")]
    NotFound(TemplateId),

    /// A template with the supplied id already exists
    #[error("Workflow template already exists: {0}")]
    AlreadyExists(TemplateId),

    /// A create or update payload is structurally invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// A step condition could not be parsed or evaluated
    #[error("Condition of step {step_number} ('{expression}') could not be evaluated: {source}")]
    ConditionEvaluation {
        step_number: u32,
        expression: String,
        #[source]
        source: ConditionError,
    },

    /// The backing store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApprovalError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias for approval workflow operations
pub type ApprovalResult<T> = Result<T, ApprovalError>;
