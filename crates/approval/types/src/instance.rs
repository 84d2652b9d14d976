//! Instantiated workflows: the concrete step list for one transaction

use crate::{WorkflowTemplateStep, WorkflowType};
use serde::{Deserialize, Serialize};

/// The approval steps that apply to a specific business transaction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantiatedWorkflow {
    /// Copied from the template
    pub workflow_type: WorkflowType,
    /// Applicable steps, in template order
    pub steps: Vec<InstantiatedStep>,
}

impl InstantiatedWorkflow {
    pub fn step_numbers(&self) -> Vec<u32> {
        self.steps.iter().map(|s| s.step_number).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// One applicable step with its approver resolved
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantiatedStep {
    #[serde(default)]
    pub approver_id: Option<String>,
    pub approver_role: String,
    pub step_number: u32,
    #[serde(default)]
    pub sla_hours: Option<f64>,
}

impl InstantiatedStep {
    /// Build from a template step, falling back to `default_role` when
    /// the step names no approver role
    pub fn from_template_step(step: &WorkflowTemplateStep, default_role: &str) -> Self {
        Self {
            approver_id: step.approver_id.clone(),
            approver_role: step
                .approver_role
                .clone()
                .unwrap_or_else(|| default_role.to_string()),
            step_number: step.step_number,
            sla_hours: step.sla_hours,
        }
    }
}
