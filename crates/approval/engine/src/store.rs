//! Template store: keyed collection of workflow templates
//!
//! [`TemplateStore`] is the pluggable backend seam. [`InMemoryTemplateStore`]
//! keeps everything behind one `RwLock`, so every write (create, update,
//! soft delete) is observed by readers either fully or not at all.

use approval_types::{
    ApprovalError, ApprovalResult, NewTemplate, TemplateId, TemplatePatch, WorkflowTemplate,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage interface for workflow templates
pub trait TemplateStore: Send + Sync {
    /// Store a new template, generating an id when none is supplied
    fn create(&self, input: NewTemplate) -> ApprovalResult<WorkflowTemplate>;

    /// Fetch a template by id, active or not
    fn get(&self, id: &TemplateId) -> ApprovalResult<WorkflowTemplate>;

    /// Active templates in insertion order
    fn list_active(&self) -> ApprovalResult<Vec<WorkflowTemplate>>;

    /// Active templates whose category matches exactly
    fn list_by_category(&self, category: &str) -> ApprovalResult<Vec<WorkflowTemplate>>;

    /// Merge a partial update over an existing template
    fn update(&self, id: &TemplateId, patch: TemplatePatch) -> ApprovalResult<WorkflowTemplate>;

    /// Mark a template inactive
    fn soft_delete(&self, id: &TemplateId) -> ApprovalResult<()>;

    /// Number of stored templates, including inactive ones
    fn count(&self) -> ApprovalResult<usize>;

    fn contains(&self, id: &TemplateId) -> ApprovalResult<bool>;
}

#[derive(Default)]
struct Inner {
    templates: HashMap<TemplateId, WorkflowTemplate>,
    order: Vec<TemplateId>,
}

impl Inner {
    fn active(&self) -> impl Iterator<Item = &WorkflowTemplate> {
        self.order
            .iter()
            .filter_map(|id| self.templates.get(id))
            .filter(|t| t.is_active)
    }
}

/// In-memory template store
#[derive(Default)]
pub struct InMemoryTemplateStore {
    inner: RwLock<Inner>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn create(&self, input: NewTemplate) -> ApprovalResult<WorkflowTemplate> {
        input.validate()?;

        let mut guard = self
            .inner
            .write()
            .map_err(|_| ApprovalError::Storage("templates lock poisoned".to_string()))?;

        let id = match input.id.clone() {
            Some(id) => {
                if guard.templates.contains_key(&id) {
                    return Err(ApprovalError::AlreadyExists(id));
                }
                id
            }
            None => loop {
                let id = TemplateId::generate();
                if !guard.templates.contains_key(&id) {
                    break id;
                }
            },
        };

        let template = input.into_template(id.clone(), Utc::now());
        guard.order.push(id.clone());
        guard.templates.insert(id.clone(), template.clone());

        tracing::info!(
            template_id = %id,
            name = %template.name,
            category = %template.category,
            steps = template.steps.len(),
            "Workflow template created"
        );

        Ok(template)
    }

    fn get(&self, id: &TemplateId) -> ApprovalResult<WorkflowTemplate> {
        let guard = self
            .inner
            .read()
            .map_err(|_| ApprovalError::Storage("templates lock poisoned".to_string()))?;

        tracing::debug!(template_id = %id, "Fetching workflow template");

        guard
            .templates
            .get(id)
            .cloned()
            .ok_or_else(|| ApprovalError::NotFound(id.clone()))
    }

    fn list_active(&self) -> ApprovalResult<Vec<WorkflowTemplate>> {
        let guard = self
            .inner
            .read()
            .map_err(|_| ApprovalError::Storage("templates lock poisoned".to_string()))?;

        let templates: Vec<_> = guard.active().cloned().collect();
        tracing::debug!(count = templates.len(), "Listed active workflow templates");
        Ok(templates)
    }

    fn list_by_category(&self, category: &str) -> ApprovalResult<Vec<WorkflowTemplate>> {
        let guard = self
            .inner
            .read()
            .map_err(|_| ApprovalError::Storage("templates lock poisoned".to_string()))?;

        let templates: Vec<_> = guard
            .active()
            .filter(|t| t.category == category)
            .cloned()
            .collect();
        tracing::debug!(
            category = %category,
            count = templates.len(),
            "Listed workflow templates by category"
        );
        Ok(templates)
    }

    fn update(&self, id: &TemplateId, patch: TemplatePatch) -> ApprovalResult<WorkflowTemplate> {
        patch.validate()?;

        let mut guard = self
            .inner
            .write()
            .map_err(|_| ApprovalError::Storage("templates lock poisoned".to_string()))?;
        let existing = guard
            .templates
            .get(id)
            .ok_or_else(|| ApprovalError::NotFound(id.clone()))?;

        // Readers must never observe a half-applied patch
        let mut updated = existing.clone();
        patch.apply_to(&mut updated);
        updated.updated_at = next_timestamp(existing.updated_at);
        guard.templates.insert(id.clone(), updated.clone());

        tracing::info!(
            template_id = %id,
            is_active = updated.is_active,
            "Workflow template updated"
        );

        Ok(updated)
    }

    fn soft_delete(&self, id: &TemplateId) -> ApprovalResult<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| ApprovalError::Storage("templates lock poisoned".to_string()))?;
        let template = guard
            .templates
            .get_mut(id)
            .ok_or_else(|| ApprovalError::NotFound(id.clone()))?;

        template.is_active = false;
        template.updated_at = next_timestamp(template.updated_at);

        tracing::info!(template_id = %id, "Workflow template deactivated");
        Ok(())
    }

    fn count(&self) -> ApprovalResult<usize> {
        let guard = self
            .inner
            .read()
            .map_err(|_| ApprovalError::Storage("templates lock poisoned".to_string()))?;
        Ok(guard.templates.len())
    }

    fn contains(&self, id: &TemplateId) -> ApprovalResult<bool> {
        let guard = self
            .inner
            .read()
            .map_err(|_| ApprovalError::Storage("templates lock poisoned".to_string()))?;
        Ok(guard.templates.contains_key(id))
    }
}

/// Current time, forced strictly past `previous`
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
