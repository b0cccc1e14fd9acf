//! Session file: the editable record of one SOW between commands

use std::path::Path;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::CostOwnership;
use crate::draft::{DraftStore, SolutionContext, SowDraft};
use crate::render::SowFields;

/// What `sa draft` writes and `sa export` reads
///
/// `fields` is absent until `sa form` materializes it; once present it is
/// taken as-is, so hand edits win over the draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFile {
    pub context: SolutionContext,
    pub draft: SowDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<SowFields>,
}

impl SessionFile {
    pub fn new(context: SolutionContext, draft: SowDraft) -> Self {
        Self {
            context,
            draft,
            fields: None,
        }
    }

    /// Snapshot of a store's committed draft
    pub fn from_store(context: SolutionContext, store: &DraftStore) -> Self {
        Self::new(context, store.snapshot())
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!(?path, "SessionFile::load: called");
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read session file: {}", path.display()))?;
        let session: SessionFile = serde_yaml::from_str(&content)
            .context(format!("Failed to parse session file: {}", path.display()))?;
        info!(?path, keys = ?session.draft.keys(), "Loaded session");
        Ok(session)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(?path, "SessionFile::save: called");
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context(format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(self).context("Failed to serialize session")?;
        std::fs::write(path, content).context(format!("Failed to write session file: {}", path.display()))?;
        Ok(())
    }

    /// Stored fields, or fields derived from the draft with `ownership`
    pub fn resolve_fields(&self, ownership: CostOwnership) -> SowFields {
        match &self.fields {
            Some(fields) => fields.clone(),
            None => SowFields::from_draft(&self.context, &self.draft, ownership),
        }
    }

    /// Derive the field set into the file if it is not there yet
    ///
    /// Returns false when fields were already present.
    pub fn materialize_fields(&mut self, ownership: CostOwnership) -> bool {
        if self.fields.is_some() {
            return false;
        }
        self.fields = Some(SowFields::from_draft(&self.context, &self.draft, ownership));
        true
    }
}
