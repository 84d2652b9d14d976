//! Workflow templates: reusable approval workflow definitions
//!
//! A template is an ordered list of approval steps. Each step may carry
//! a condition that decides, per business transaction, whether the step
//! applies. Templates are never physically removed; deactivating one
//! (`is_active = false`) is the only form of deletion.

use crate::{ApprovalError, ApprovalResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a workflow template
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn generate() -> Self {
        Self(format!("template-{}", uuid::Uuid::new_v4()))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// How the instantiated steps are meant to be executed downstream
///
/// Instantiation passes this through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowType {
    #[default]
    Sequential,
    Parallel,
    Conditional,
}

impl std::fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel => write!(f, "parallel"),
            Self::Conditional => write!(f, "conditional"),
        }
    }
}

impl std::str::FromStr for WorkflowType {
    type Err = ApprovalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            "conditional" => Ok(Self::Conditional),
            other => Err(ApprovalError::Validation(format!(
                "unknown workflow type '{}'; expected sequential, parallel or conditional",
                other
            ))),
        }
    }
}

// ── Template ─────────────────────────────────────────────────────────

/// A stored workflow template
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplate {
    /// Unique identifier, never changes after creation
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Execution style of the instantiated steps
    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,
    /// Approval steps in the order they were supplied
    pub steps: Vec<WorkflowTemplateStep>,
    /// `false` marks the template as deleted
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkflowTemplate {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Steps that carry a condition
    pub fn conditional_steps(&self) -> impl Iterator<Item = &WorkflowTemplateStep> {
        self.steps.iter().filter(|s| s.active_condition().is_some())
    }
}

/// One approval step of a template
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplateStep {
    /// Position label; output order follows the step list, not this number
    pub step_number: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<String>,
    /// Boolean expression over context variables; absent means always applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_hours: Option<f64>,
}

impl WorkflowTemplateStep {
    pub fn new(step_number: u32, name: impl Into<String>) -> Self {
        Self {
            step_number,
            name: name.into(),
            approver_role: None,
            approver_id: None,
            condition: None,
            actions: Vec::new(),
            sla_hours: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.approver_role = Some(role.into());
        self
    }

    pub fn with_approver(mut self, approver_id: impl Into<String>) -> Self {
        self.approver_id = Some(approver_id.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn with_sla_hours(mut self, hours: f64) -> Self {
        self.sla_hours = Some(hours);
        self
    }

    /// The condition to evaluate, if any
    ///
    /// Only a missing or empty condition counts as absent. Any other text,
    /// whitespace included, is evaluated as written.
    pub fn active_condition(&self) -> Option<&str> {
        self.condition.as_deref().filter(|c| !c.is_empty())
    }
}

// ── Inputs ───────────────────────────────────────────────────────────

/// Payload for creating a template
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    /// Explicit id; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub workflow_type: WorkflowType,
    #[serde(default)]
    pub steps: Vec<WorkflowTemplateStep>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl NewTemplate {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            category: category.into(),
            workflow_type: WorkflowType::default(),
            steps: Vec::new(),
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(TemplateId::new(id));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_type(mut self, workflow_type: WorkflowType) -> Self {
        self.workflow_type = workflow_type;
        self
    }

    pub fn with_step(mut self, step: WorkflowTemplateStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Check structurally required fields
    pub fn validate(&self) -> ApprovalResult<()> {
        if let Some(id) = &self.id {
            if id.0.trim().is_empty() {
                return Err(ApprovalError::Validation(
                    "Template id must not be blank".into(),
                ));
            }
        }
        validate_name(&self.name)?;
        validate_steps(&self.steps)
    }

    /// Materialize the stored record
    pub fn into_template(self, id: TemplateId, now: DateTime<Utc>) -> WorkflowTemplate {
        WorkflowTemplate {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            workflow_type: self.workflow_type,
            steps: self.steps,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; only supplied fields are changed
///
/// `id` is accepted so that whole records can be sent back as patches,
/// but it is always ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<WorkflowType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<WorkflowTemplateStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl TemplatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn workflow_type(mut self, workflow_type: WorkflowType) -> Self {
        self.workflow_type = Some(workflow_type);
        self
    }

    pub fn steps(mut self, steps: Vec<WorkflowTemplateStep>) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn validate(&self) -> ApprovalResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(steps) = &self.steps {
            validate_steps(steps)?;
        }
        Ok(())
    }

    /// Merge supplied fields over `template`, leaving `id` and timestamps alone
    pub fn apply_to(self, template: &mut WorkflowTemplate) {
        if let Some(name) = self.name {
            template.name = name;
        }
        if let Some(description) = self.description {
            template.description = description;
        }
        if let Some(category) = self.category {
            template.category = category;
        }
        if let Some(workflow_type) = self.workflow_type {
            template.workflow_type = workflow_type;
        }
        if let Some(steps) = self.steps {
            template.steps = steps;
        }
        if let Some(is_active) = self.is_active {
            template.is_active = is_active;
        }
    }
}

fn validate_name(name: &str) -> ApprovalResult<()> {
    if name.trim().is_empty() {
        return Err(ApprovalError::Validation(
            "Template name must not be blank".into(),
        ));
    }
    Ok(())
}

fn validate_steps(steps: &[WorkflowTemplateStep]) -> ApprovalResult<()> {
    for (index, step) in steps.iter().enumerate() {
        if step.name.trim().is_empty() {
            return Err(ApprovalError::Validation(format!(
                "Step {} (position {}) must have a name",
                step.step_number,
                index + 1
            )));
        }
    }
    Ok(())
}
