//! Condition error types

/// Errors that can occur while parsing or evaluating a step condition
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionError {
    #[error("Parse error at line {line}, column {col}: {message}")]
    Parse {
        line: usize,
        col: usize,
        message: String,
    },

    #[error("Unexpected token: expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    #[error("Unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    #[error("Unknown variable: '{0}'")]
    UnknownVariable(String),

    #[error("Operator '{op}' is not supported for {kind} operands")]
    UnsupportedComparison { op: String, kind: String },

    #[error("Condition must produce a boolean, got a {0}")]
    NotBoolean(String),
}

/// Result type alias for condition operations
pub type ConditionResult<T> = Result<T, ConditionError>;
