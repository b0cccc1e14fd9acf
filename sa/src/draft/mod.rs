//! Draft model and session store
//!
//! A [`SowDraft`] accumulates generated sections phase by phase and takes
//! direct user edits. [`DraftStore`] owns the committed copy for a session.

mod context;
mod store;
mod types;

pub use context::SolutionContext;
pub use store::DraftStore;
pub use types::{Architecture, SowDraft, Stakeholder, SuccessCriterion, TimelineEntry};
