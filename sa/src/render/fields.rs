//! The finalized, editable field set consumed by the renderers

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CostOwnership;
use crate::draft::{Architecture, SolutionContext, SowDraft, Stakeholder, SuccessCriterion, TimelineEntry};

pub const DEFAULT_OBJECTIVE: &str = "Run draft generation to populate this objective.";
pub const DEFAULT_COMPUTE: &str = "AWS Lambda, Step Functions";
pub const DEFAULT_STORAGE: &str = "Amazon S3, DynamoDB";
pub const DEFAULT_ML_SERVICES: &str = "Amazon Bedrock";
pub const DEFAULT_UI: &str = "Streamlit on S3";
pub const DEFAULT_USAGE_USERS: u64 = 100;
pub const DEFAULT_USAGE_REQUESTS: u64 = 5;

/// Everything that ends up in an exported document
///
/// List sections the user edits as free text (dependencies, assumptions,
/// success criteria) are kept as text here, one item per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SowFields {
    pub solution_type: String,
    pub customer: String,
    pub objective: String,
    pub stakeholders: Vec<Stakeholder>,
    pub dependencies: String,
    pub assumptions: String,
    pub success_criteria: String,
    pub architecture: Architecture,
    pub timeline: Vec<TimelineEntry>,
    pub usage_users: u64,
    pub usage_requests: u64,
    pub ownership: CostOwnership,
}

impl Default for SowFields {
    fn default() -> Self {
        Self::from_draft(&SolutionContext::default(), &SowDraft::default(), CostOwnership::default())
    }
}

impl SowFields {
    /// Fill the form from a draft, applying defaults for anything missing
    pub fn from_draft(context: &SolutionContext, draft: &SowDraft, ownership: CostOwnership) -> Self {
        debug!(keys = ?draft.keys(), "SowFields::from_draft: called");
        let architecture = draft.architecture.clone().unwrap_or_default();

        Self {
            solution_type: context.solution_type.clone(),
            customer: context.customer.clone(),
            objective: draft
                .objective
                .clone()
                .unwrap_or_else(|| DEFAULT_OBJECTIVE.to_string()),
            stakeholders: draft
                .stakeholders
                .clone()
                .unwrap_or_else(|| vec![Stakeholder::default()]),
            dependencies: draft.dependencies.as_deref().unwrap_or_default().join("\n"),
            assumptions: draft.assumptions.as_deref().unwrap_or_default().join("\n"),
            success_criteria: success_criteria_text(draft.success_criteria.as_deref().unwrap_or_default()),
            architecture: Architecture {
                compute: or_default(architecture.compute, DEFAULT_COMPUTE),
                storage: or_default(architecture.storage, DEFAULT_STORAGE),
                ml_services: or_default(architecture.ml_services, DEFAULT_ML_SERVICES),
                ui: or_default(architecture.ui, DEFAULT_UI),
            },
            timeline: draft
                .timeline
                .clone()
                .unwrap_or_else(|| vec![TimelineEntry::new("Setup", "Init", "Wk1")]),
            usage_users: whole_number(draft.usage_users, DEFAULT_USAGE_USERS),
            usage_requests: whole_number(draft.usage_requests, DEFAULT_USAGE_REQUESTS),
            ownership,
        }
    }

    /// Non-blank lines of the dependencies text
    pub fn dependency_items(&self) -> Vec<&str> {
        bullet_lines(&self.dependencies)
    }

    /// Non-blank lines of the assumptions text
    pub fn assumption_items(&self) -> Vec<&str> {
        bullet_lines(&self.assumptions)
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() { default.to_string() } else { value }
}

/// Truncate to a whole, non-negative count
fn whole_number(value: Option<f64>, default: u64) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        Some(_) => 0,
        None => default,
    }
}

/// One entry per line that has any non-whitespace content
pub fn bullet_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Editable text form of the success criteria
///
/// Each section becomes a `**Heading**` line, a `- point` line per point and a
/// trailing blank line.
pub fn success_criteria_text(criteria: &[SuccessCriterion]) -> String {
    let mut text = String::new();
    for criterion in criteria {
        text.push_str(&format!("**{}**\n", criterion.heading));
        let points: Vec<String> = criterion.points.iter().map(|p| format!("- {}", p)).collect();
        text.push_str(&points.join("\n"));
        text.push_str("\n\n");
    }
    text
}
