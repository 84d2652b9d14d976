//! Template service: the operation surface consumed by transport layers
//!
//! Wraps a [`TemplateStore`] and an [`InstantiationEngine`] sharing it.

use crate::config::EngineConfig;
use crate::instantiation::InstantiationEngine;
use crate::seed::{seed_store, SeedResult};
use crate::store::{InMemoryTemplateStore, TemplateStore};
use approval_condition::{Condition, ConditionError, Context};
use approval_types::{
    ApprovalResult, InstantiatedWorkflow, NewTemplate, TemplateId, TemplatePatch,
    WorkflowTemplate, WorkflowTemplateStep,
};
use serde::Serialize;
use std::sync::Arc;

/// A step condition that does not parse
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDiagnostic {
    pub step_number: u32,
    pub expression: String,
    pub error: String,
}

impl ConditionDiagnostic {
    fn new(step: &WorkflowTemplateStep, expression: &str, error: &ConditionError) -> Self {
        Self {
            step_number: step.step_number,
            expression: expression.to_string(),
            error: error.to_string(),
        }
    }
}

/// Parse every step condition and report the ones that fail
pub fn diagnose_steps(steps: &[WorkflowTemplateStep]) -> Vec<ConditionDiagnostic> {
    steps
        .iter()
        .filter_map(|step| {
            let expression = step.active_condition()?;
            Condition::parse(expression)
                .err()
                .map(|err| ConditionDiagnostic::new(step, expression, &err))
        })
        .collect()
}

/// Workflow template management and instantiation
pub struct TemplateService<S: TemplateStore + ?Sized = InMemoryTemplateStore> {
    store: Arc<S>,
    engine: InstantiationEngine<S>,
}

impl TemplateService<InMemoryTemplateStore> {
    /// An empty in-memory service
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTemplateStore::new()))
    }

    /// An in-memory service seeded and tuned from configuration
    pub fn from_config(config: &EngineConfig) -> SeedResult<Self> {
        let store = Arc::new(InMemoryTemplateStore::new());
        seed_store(store.as_ref(), &config.seeds)?;
        Ok(Self::new(store)
            .with_default_approver_role(config.instantiation.default_approver_role.clone()))
    }
}

impl<S: TemplateStore + ?Sized> TemplateService<S> {
    pub fn new(store: Arc<S>) -> Self {
        let engine = InstantiationEngine::new(Arc::clone(&store));
        Self { store, engine }
    }

    pub fn with_default_approver_role(mut self, role: impl Into<String>) -> Self {
        self.engine = self.engine.with_default_approver_role(role);
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn engine(&self) -> &InstantiationEngine<S> {
        &self.engine
    }

    pub fn create_template(&self, input: NewTemplate) -> ApprovalResult<WorkflowTemplate> {
        self.store.create(input)
    }

    pub fn get_template(&self, id: &TemplateId) -> ApprovalResult<WorkflowTemplate> {
        self.store.get(id)
    }

    /// Active templates only
    pub fn list_templates(&self) -> ApprovalResult<Vec<WorkflowTemplate>> {
        self.store.list_active()
    }

    /// Active templates in a category (exact, case-sensitive match)
    pub fn list_templates_by_category(
        &self,
        category: &str,
    ) -> ApprovalResult<Vec<WorkflowTemplate>> {
        self.store.list_by_category(category)
    }

    pub fn update_template(
        &self,
        id: &TemplateId,
        patch: TemplatePatch,
    ) -> ApprovalResult<WorkflowTemplate> {
        self.store.update(id, patch)
    }

    /// Soft delete; the template stays retrievable by id
    pub fn delete_template(&self, id: &TemplateId) -> ApprovalResult<()> {
        self.store.soft_delete(id)
    }

    pub fn instantiate_template(
        &self,
        id: &TemplateId,
        context: &Context,
    ) -> ApprovalResult<InstantiatedWorkflow> {
        self.engine.instantiate(id, context)
    }

    /// Report every step condition of a template that does not parse
    pub fn check_conditions(&self, id: &TemplateId) -> ApprovalResult<Vec<ConditionDiagnostic>> {
        let template = self.store.get(id)?;
        let diagnostics = diagnose_steps(&template.steps);

        for diagnostic in &diagnostics {
            tracing::warn!(
                template_id = %id,
                step_number = diagnostic.step_number,
                condition = %diagnostic.expression,
                error = %diagnostic.error,
                "Malformed step condition"
            );
        }

        Ok(diagnostics)
    }
}
