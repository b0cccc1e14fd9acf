//! Draft generation
//!
//! - [`Phase`] - the six phases with prompt template, schema and typed output
//! - [`DraftOrchestrator`] - runs them in order against a [`DraftStore`](crate::draft::DraftStore)
//! - [`ProgressReporter`] - receives progress events as phases run

mod engine;
mod phase;
mod progress;

pub use engine::{DraftOrchestrator, OrchestratorError, RunSummary};
pub use phase::{
    ArchitectureOutput, DependenciesOutput, ObjectiveOutput, Phase, PhaseOutput, StakeholdersOutput,
    SuccessCriteriaOutput, TimelineOutput,
};
pub use progress::{NullReporter, ProgressEvent, ProgressReporter, RecordingReporter};
