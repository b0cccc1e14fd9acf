//! Draft field types

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// One stakeholder row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stakeholder {
    pub name: String,
    pub title: String,
    pub email: String,
}

impl Stakeholder {
    pub fn new(name: impl Into<String>, title: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            email: email.into(),
        }
    }
}

/// A success-criteria section and its bullet points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessCriterion {
    pub heading: String,
    pub points: Vec<String>,
}

/// Architecture building blocks, one free-text line each
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Architecture {
    pub compute: String,
    pub storage: String,
    pub ml_services: String,
    pub ui: String,
}

/// One timeline row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub phase: String,
    #[serde(deserialize_with = "string_or_number")]
    pub task: String,
    #[serde(deserialize_with = "string_or_number")]
    pub weeks: String,
}

impl TimelineEntry {
    pub fn new(phase: impl Into<String>, task: impl Into<String>, weeks: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            task: task.into(),
            weeks: weeks.into(),
        }
    }
}

// Models sometimes answer `"weeks": 2` despite the STRING schema.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("expected string, got {}", other))),
    }
}

/// The accumulated, editable draft
///
/// Every key is optional. Merging is shallow: a key set in the incoming draft
/// replaces the whole value, keys it leaves unset are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SowDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stakeholders: Option<Vec<Stakeholder>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_criteria: Option<Vec<SuccessCriterion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<TimelineEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_users: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_requests: Option<f64>,
}

macro_rules! draft_keys {
    ($($key:ident),* $(,)?) => {
        impl SowDraft {
            /// Overwrite every key `patch` sets, keep every key it leaves unset
            pub fn merge(&mut self, patch: SowDraft) {
                debug!(keys = ?patch.keys(), "SowDraft::merge: called");
                $(
                    if let Some(value) = patch.$key {
                        self.$key = Some(value);
                    }
                )*
            }

            /// Names of the keys that are set
            pub fn keys(&self) -> Vec<&'static str> {
                let mut keys = Vec::new();
                $(
                    if self.$key.is_some() {
                        keys.push(stringify!($key));
                    }
                )*
                keys
            }
        }
    };
}

draft_keys!(
    objective,
    stakeholders,
    dependencies,
    assumptions,
    success_criteria,
    architecture,
    timeline,
    usage_users,
    usage_requests,
);

impl SowDraft {
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Merge into a copy, leaving `self` untouched
    pub fn merged(&self, patch: SowDraft) -> SowDraft {
        let mut out = self.clone();
        out.merge(patch);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stakeholders() -> Vec<Stakeholder> {
        vec![Stakeholder::new("Partner Exec", "Head of Analytics & ML", "exec@partner.example")]
    }

    #[test]
    fn test_merge_adds_new_key_and_keeps_old() {
        let mut draft = SowDraft {
            objective: Some("A".to_string()),
            ..Default::default()
        };
        draft.merge(SowDraft {
            stakeholders: Some(stakeholders()),
            ..Default::default()
        });

        assert_eq!(draft.objective.as_deref(), Some("A"));
        assert_eq!(draft.stakeholders, Some(stakeholders()));
        assert_eq!(draft.keys(), vec!["objective", "stakeholders"]);
    }

    #[test]
    fn test_merge_replaces_whole_value() {
        let mut draft = SowDraft {
            dependencies: Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
            ..Default::default()
        };
        draft.merge(SowDraft {
            dependencies: Some(vec!["z".to_string()]),
            ..Default::default()
        });
        assert_eq!(draft.dependencies, Some(vec!["z".to_string()]));
    }

    #[test]
    fn test_merge_empty_patch_is_noop() {
        let draft = SowDraft {
            objective: Some("A".to_string()),
            usage_users: Some(250.0),
            ..Default::default()
        };
        assert_eq!(draft.merged(SowDraft::default()), draft);
    }

    #[test]
    fn test_serialize_skips_unset_keys() {
        let draft = SowDraft {
            objective: Some("A".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, serde_json::json!({"objective": "A"}));
    }

    #[test]
    fn test_timeline_weeks_accepts_number() {
        let entry: TimelineEntry =
            serde_json::from_value(serde_json::json!({"phase": "Build", "task": "Agents", "weeks": 3})).unwrap();
        assert_eq!(entry.weeks, "3");
    }

    #[test]
    fn test_timeline_missing_fields_default() {
        let entry: TimelineEntry = serde_json::from_value(serde_json::json!({"phase": "Build"})).unwrap();
        assert_eq!(entry, TimelineEntry::new("Build", "", ""));
    }

    fn arb_text() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z]{0,8}")
    }

    fn arb_draft() -> impl Strategy<Value = SowDraft> {
        (arb_text(), arb_text(), proptest::option::of(0u32..1000)).prop_map(|(objective, dep, users)| SowDraft {
            objective,
            dependencies: dep.map(|d| vec![d]),
            usage_users: users.map(f64::from),
            ..Default::default()
        })
    }

    proptest! {
        #[test]
        fn prop_merge_preserves_untouched_and_replaces_defined(base in arb_draft(), patch in arb_draft()) {
            let merged = base.merged(patch.clone());

            prop_assert_eq!(&merged.objective, if patch.objective.is_some() { &patch.objective } else { &base.objective });
            prop_assert_eq!(&merged.dependencies, if patch.dependencies.is_some() { &patch.dependencies } else { &base.dependencies });
            prop_assert_eq!(merged.usage_users, patch.usage_users.or(base.usage_users));
            prop_assert_eq!(&merged.stakeholders, &base.stakeholders);
        }

        #[test]
        fn prop_merge_is_associative(a in arb_draft(), b in arb_draft(), c in arb_draft()) {
            let left = a.merged(b.clone()).merged(c.clone());
            let right = a.merged(b.merged(c));
            prop_assert_eq!(left, right);
        }
    }
}
