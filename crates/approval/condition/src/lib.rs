//! Step condition language for approval workflows
//!
//! A condition gates whether a workflow step applies to a given
//! business transaction, e.g. `amount > 10000` or
//! `urgency === "critical"`. Conditions are lexed, parsed into a small
//! tagged syntax tree and walked by an evaluator. Condition text is
//! never compiled or executed, so a template author (or anyone who can
//! influence template or context content) cannot run code through it.
//!
//! # Example
//!
//! ```rust
//! use approval_condition::{context, Condition, Value};
//!
//! let condition = Condition::parse("amount > 10000 && urgency == 'critical'").unwrap();
//! let ctx = context([
//!     ("amount", Value::from(25000)),
//!     ("urgency", Value::from("critical")),
//! ]);
//!
//! assert!(condition.evaluate(&ctx).unwrap());
//! assert_eq!(condition.variables(), vec!["amount", "urgency"]);
//! ```

#![deny(unsafe_code)]

pub mod ast;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{CompareOp, Expr};
pub use errors::{ConditionError, ConditionResult};
pub use parser::Parser;
pub use value::{context, Context, Value};

use std::str::FromStr;

/// A parsed condition, ready to be evaluated against any number of contexts
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    source: String,
    expr: Expr,
}

impl Condition {
    /// Parse condition text
    pub fn parse(source: &str) -> ConditionResult<Self> {
        let expr = Parser::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Evaluate against a context
    pub fn evaluate(&self, context: &Context) -> ConditionResult<bool> {
        evaluator::evaluate(&self.expr, context)
    }

    /// Context variables the condition reads
    pub fn variables(&self) -> Vec<&str> {
        self.expr.variables()
    }
}

impl FromStr for Condition {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Parse and evaluate condition text in one step
pub fn evaluate(source: &str, context: &Context) -> ConditionResult<bool> {
    Condition::parse(source)?.evaluate(context)
}
