//! In-memory session draft store

use tracing::debug;

use super::SowDraft;

/// Holds the committed draft for one session
///
/// Generation commits after every phase, so whatever was committed survives a
/// later failure. User edits overwrite keys directly.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    committed: SowDraft,
    generation_complete: bool,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing draft (e.g. one loaded from a session file)
    pub fn with_draft(draft: SowDraft) -> Self {
        Self {
            committed: draft,
            generation_complete: false,
        }
    }

    /// Current committed draft
    pub fn draft(&self) -> &SowDraft {
        &self.committed
    }

    /// Copy of the committed draft to work on
    pub fn snapshot(&self) -> SowDraft {
        self.committed.clone()
    }

    /// Replace the committed draft wholesale
    pub fn commit(&mut self, draft: SowDraft) {
        debug!(keys = ?draft.keys(), "DraftStore::commit: called");
        self.committed = draft;
    }

    /// Merge a partial draft into the committed one
    pub fn merge(&mut self, patch: SowDraft) {
        self.committed.merge(patch);
    }

    /// Apply a direct user edit
    pub fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut SowDraft),
    {
        debug!("DraftStore::edit: called");
        f(&mut self.committed);
    }

    pub fn mark_generation_complete(&mut self) {
        self.generation_complete = true;
    }

    pub fn generation_complete(&self) -> bool {
        self.generation_complete
    }

    /// Hand the committed draft back, ending the session
    pub fn into_draft(self) -> SowDraft {
        self.committed
    }
}
