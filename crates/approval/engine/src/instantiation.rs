//! Instantiation engine: template + context → applicable approval steps
//!
//! Instantiation only reads the store. A step is kept when it has no
//! condition or its condition evaluates to `true`; a condition that fails
//! to parse or evaluate excludes the step and is reported with `warn!`
//! so the template author can fix it. Output order is template order.

use crate::store::TemplateStore;
use approval_condition::{Condition, Context};
use approval_types::{
    ApprovalError, ApprovalResult, InstantiatedStep, InstantiatedWorkflow, TemplateId,
    WorkflowTemplate, WorkflowTemplateStep,
};
use std::sync::Arc;

/// Role assigned to steps that name no approver role
pub const DEFAULT_APPROVER_ROLE: &str = "APPROVER";

/// Computes concrete approval step lists from stored templates
pub struct InstantiationEngine<S: TemplateStore + ?Sized> {
    store: Arc<S>,
    default_approver_role: String,
}

impl<S: TemplateStore + ?Sized> Clone for InstantiationEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            default_approver_role: self.default_approver_role.clone(),
        }
    }
}

impl<S: TemplateStore + ?Sized> InstantiationEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            default_approver_role: DEFAULT_APPROVER_ROLE.to_string(),
        }
    }

    pub fn with_default_approver_role(mut self, role: impl Into<String>) -> Self {
        self.default_approver_role = role.into();
        self
    }

    pub fn default_approver_role(&self) -> &str {
        &self.default_approver_role
    }

    /// Instantiate a stored template against a context
    ///
    /// Fails only when the template does not exist (or the store fails).
    pub fn instantiate(
        &self,
        template_id: &TemplateId,
        context: &Context,
    ) -> ApprovalResult<InstantiatedWorkflow> {
        let template = self.store.get(template_id)?;
        Ok(self.instantiate_template(&template, context))
    }

    /// Instantiate an already loaded template
    pub fn instantiate_template(
        &self,
        template: &WorkflowTemplate,
        context: &Context,
    ) -> InstantiatedWorkflow {
        let steps: Vec<InstantiatedStep> = template
            .steps
            .iter()
            .filter(|step| self.step_applies(template, step, context))
            .map(|step| InstantiatedStep::from_template_step(step, &self.default_approver_role))
            .collect();

        tracing::info!(
            template_id = %template.id,
            workflow_type = %template.workflow_type,
            template_steps = template.steps.len(),
            included_steps = steps.len(),
            "Workflow template instantiated"
        );

        InstantiatedWorkflow {
            workflow_type: template.workflow_type,
            steps,
        }
    }

    fn step_applies(
        &self,
        template: &WorkflowTemplate,
        step: &WorkflowTemplateStep,
        context: &Context,
    ) -> bool {
        match evaluate_step(step, context) {
            Ok(included) => {
                tracing::debug!(
                    template_id = %template.id,
                    step_number = step.step_number,
                    included,
                    "Step condition resolved"
                );
                included
            }
            Err(err) => {
                tracing::warn!(
                    template_id = %template.id,
                    step_number = step.step_number,
                    condition = step.condition.as_deref().unwrap_or_default(),
                    error = %err,
                    "Step condition could not be evaluated, excluding step"
                );
                false
            }
        }
    }
}

/// Decide whether a single step applies to a context
///
/// Steps without a condition always apply. Parse and evaluation failures
/// are returned as [`ApprovalError::ConditionEvaluation`].
pub fn evaluate_step(step: &WorkflowTemplateStep, context: &Context) -> ApprovalResult<bool> {
    let Some(expression) = step.active_condition() else {
        return Ok(true);
    };

    Condition::parse(expression)
        .and_then(|condition| condition.evaluate(context))
        .map_err(|source| ApprovalError::ConditionEvaluation {
            step_number: step.step_number,
            expression: expression.to_string(),
            source,
        })
}
