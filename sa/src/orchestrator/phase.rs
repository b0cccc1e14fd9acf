//! The six generation phases, their schemas and typed outputs

use std::fmt;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::draft::{Architecture, SowDraft, Stakeholder, SuccessCriterion, TimelineEntry};
use crate::llm::decode;

/// One discrete generation step producing a named subset of draft fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Objective,
    Stakeholders,
    DependenciesAssumptions,
    SuccessCriteria,
    Architecture,
    Timeline,
}

impl Phase {
    /// Phases in execution order
    pub const ALL: [Phase; 6] = [
        Phase::Objective,
        Phase::Stakeholders,
        Phase::DependenciesAssumptions,
        Phase::SuccessCriteria,
        Phase::Architecture,
        Phase::Timeline,
    ];

    /// 1-based position
    pub fn number(&self) -> usize {
        match self {
            Phase::Objective => 1,
            Phase::Stakeholders => 2,
            Phase::DependenciesAssumptions => 3,
            Phase::SuccessCriteria => 4,
            Phase::Architecture => 5,
            Phase::Timeline => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Objective => "Objective",
            Phase::Stakeholders => "Stakeholders",
            Phase::DependenciesAssumptions => "Dependencies & Assumptions",
            Phase::SuccessCriteria => "Success Criteria",
            Phase::Architecture => "Architecture",
            Phase::Timeline => "Timeline",
        }
    }

    /// Prompt template used for this phase
    pub fn template_name(&self) -> &'static str {
        match self {
            Phase::Objective => "objective",
            Phase::Stakeholders => "stakeholders",
            Phase::DependenciesAssumptions => "dependencies",
            Phase::SuccessCriteria => "success-criteria",
            Phase::Architecture => "architecture",
            Phase::Timeline => "timeline",
        }
    }

    /// Progress reported once this phase has run, successful or not
    pub fn progress_percent(&self) -> u8 {
        match self {
            Phase::Objective => 20,
            Phase::Stakeholders => 40,
            Phase::DependenciesAssumptions => 60,
            Phase::SuccessCriteria => 80,
            Phase::Architecture => 90,
            Phase::Timeline => 100,
        }
    }

    /// Status line shown while the phase runs
    pub fn status_message(&self, solution_type: &str) -> String {
        let total = Phase::ALL.len();
        match self {
            Phase::Objective => format!("1/{} Generating Specific Objective for {}...", total, solution_type),
            Phase::Stakeholders => format!("2/{} Generating Stakeholder information...", total),
            Phase::DependenciesAssumptions => format!("3/{} Generating Dependencies...", total),
            Phase::SuccessCriteria => format!("4/{} Defining Success Criteria...", total),
            Phase::Architecture => format!("5/{} Selecting AWS Services...", total),
            Phase::Timeline => format!("6/{} Finalizing Timeline...", total),
        }
    }

    /// Response schema in the endpoint's vocabulary
    pub fn schema(&self) -> Value {
        let text = json!({"type": "STRING"});
        let text_list = json!({"type": "ARRAY", "items": {"type": "STRING"}});
        match self {
            Phase::Objective => object(json!({"objective": text}), &["objective"]),
            Phase::Stakeholders => object(
                json!({
                    "stakeholders": {
                        "type": "ARRAY",
                        "items": object(json!({"name": text, "title": text, "email": text}), &["name", "title", "email"]),
                    }
                }),
                &["stakeholders"],
            ),
            Phase::DependenciesAssumptions => object(
                json!({"dependencies": text_list, "assumptions": text_list}),
                &["dependencies", "assumptions"],
            ),
            Phase::SuccessCriteria => object(
                json!({
                    "success_criteria": {
                        "type": "ARRAY",
                        "items": object(json!({"heading": text, "points": text_list}), &["heading", "points"]),
                    }
                }),
                &["success_criteria"],
            ),
            Phase::Architecture => object(
                json!({
                    "architecture": object(
                        json!({"compute": text, "storage": text, "ml_services": text, "ui": text}),
                        &["compute", "storage", "ml_services", "ui"],
                    )
                }),
                &["architecture"],
            ),
            Phase::Timeline => object(
                json!({
                    "timeline": {
                        "type": "ARRAY",
                        "items": object(json!({"phase": text, "task": text, "weeks": text}), &["phase", "task", "weeks"]),
                    },
                    "usage_users": {"type": "NUMBER"},
                    "usage_requests": {"type": "NUMBER"},
                }),
                &["timeline"],
            ),
        }
    }

    /// Decode a generated value into this phase's output shape
    pub fn decode(&self, value: Value) -> Option<PhaseOutput> {
        debug!(phase = %self, "Phase::decode: called");
        match self {
            Phase::Objective => decode(value).map(PhaseOutput::Objective),
            Phase::Stakeholders => decode(value).map(PhaseOutput::Stakeholders),
            Phase::DependenciesAssumptions => decode(value).map(PhaseOutput::DependenciesAssumptions),
            Phase::SuccessCriteria => decode(value).map(PhaseOutput::SuccessCriteria),
            Phase::Architecture => decode(value).map(PhaseOutput::Architecture),
            Phase::Timeline => decode(value).map(PhaseOutput::Timeline),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectiveOutput {
    pub objective: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StakeholdersOutput {
    pub stakeholders: Vec<Stakeholder>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DependenciesOutput {
    pub dependencies: Vec<String>,
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuccessCriteriaOutput {
    pub success_criteria: Vec<SuccessCriterion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArchitectureOutput {
    pub architecture: Architecture,
}

/// Usage estimates are optional; the timeline itself is required
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelineOutput {
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub usage_users: Option<f64>,
    #[serde(default)]
    pub usage_requests: Option<f64>,
}

/// Typed result of one phase
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseOutput {
    Objective(ObjectiveOutput),
    Stakeholders(StakeholdersOutput),
    DependenciesAssumptions(DependenciesOutput),
    SuccessCriteria(SuccessCriteriaOutput),
    Architecture(ArchitectureOutput),
    Timeline(TimelineOutput),
}

impl PhaseOutput {
    /// Partial draft holding exactly the keys this phase owns
    pub fn into_draft(self) -> SowDraft {
        match self {
            PhaseOutput::Objective(o) => SowDraft {
                objective: Some(o.objective),
                ..Default::default()
            },
            PhaseOutput::Stakeholders(o) => SowDraft {
                stakeholders: Some(o.stakeholders),
                ..Default::default()
            },
            PhaseOutput::DependenciesAssumptions(o) => SowDraft {
                dependencies: Some(o.dependencies),
                assumptions: Some(o.assumptions),
                ..Default::default()
            },
            PhaseOutput::SuccessCriteria(o) => SowDraft {
                success_criteria: Some(o.success_criteria),
                ..Default::default()
            },
            PhaseOutput::Architecture(o) => SowDraft {
                architecture: Some(o.architecture),
                ..Default::default()
            },
            PhaseOutput::Timeline(o) => SowDraft {
                timeline: Some(o.timeline),
                usage_users: o.usage_users,
                usage_requests: o.usage_requests,
                ..Default::default()
            },
        }
    }
}
