//! Approval workflow domain types
//!
//! Templates describe a reusable approval workflow as an ordered list of
//! steps, some gated by a condition. Instantiating a template against a
//! business context yields an [`InstantiatedWorkflow`] holding only the
//! applicable steps.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod instance;
pub mod template;

pub use error::{ApprovalError, ApprovalResult};
pub use instance::{InstantiatedStep, InstantiatedWorkflow};
pub use template::{
    NewTemplate, TemplateId, TemplatePatch, WorkflowTemplate, WorkflowTemplateStep, WorkflowType,
};

pub use approval_condition::{Context, Value};
