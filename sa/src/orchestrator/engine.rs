//! Draft orchestrator
//!
//! Runs the six phases strictly in order. Each phase is one structured
//! generation call; a result is merged into the working draft and committed to
//! the store right away so later failures never roll earlier phases back.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Phase, PhaseOutput, ProgressEvent, ProgressReporter};
use crate::draft::{DraftStore, SolutionContext};
use crate::llm::{GenerationRequest, StructuredGenerator};
use crate::prompts::{PromptContext, PromptLoader};

/// Errors that stop a run before all phases have been attempted
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("No API credential supplied")]
    MissingCredential,

    #[error("Failed to build system instruction: {0}")]
    SystemPrompt(String),

    #[error("Failed to build prompt for {phase}: {message}")]
    Prompt { phase: Phase, message: String },
}

/// What a completed run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub produced: Vec<Phase>,
    pub skipped: Vec<Phase>,
}

impl RunSummary {
    pub fn all_produced(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Issues the six generation phases against a draft store
pub struct DraftOrchestrator {
    generator: Arc<dyn StructuredGenerator>,
    prompts: PromptLoader,
}

impl DraftOrchestrator {
    pub fn new(generator: Arc<dyn StructuredGenerator>, prompts: PromptLoader) -> Self {
        Self { generator, prompts }
    }

    /// Run every phase, committing each result as it arrives
    ///
    /// Phases that yield nothing are skipped; the run still goes on to the
    /// next one. An error means the run stopped early, with everything
    /// committed up to that point left in `store`.
    pub async fn run(
        &self,
        context: &SolutionContext,
        credential: &str,
        store: &mut DraftStore,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<RunSummary, OrchestratorError> {
        debug!(solution_type = %context.solution_type, "DraftOrchestrator::run: called");
        if credential.trim().is_empty() {
            debug!("DraftOrchestrator::run: no credential");
            return Err(OrchestratorError::MissingCredential);
        }

        let prompt_context = PromptContext::from(context);
        let system = self
            .prompts
            .system_instruction(&prompt_context)
            .map_err(|e| OrchestratorError::SystemPrompt(e.to_string()))?;

        let mut working = store.snapshot();
        let mut summary = RunSummary::default();

        for phase in Phase::ALL {
            reporter.report(ProgressEvent::PhaseStarted {
                phase,
                message: phase.status_message(&context.solution_type),
            });

            let output = self.run_phase(phase, &prompt_context, &system, credential).await?;
            let produced = output.is_some();
            match output {
                Some(output) => {
                    working.merge(output.into_draft());
                    store.commit(working.clone());
                    info!(%phase, "Phase committed");
                    summary.produced.push(phase);
                }
                None => {
                    warn!(%phase, "Phase produced nothing");
                    summary.skipped.push(phase);
                }
            }

            reporter.report(ProgressEvent::PhaseFinished {
                phase,
                produced,
                percent: phase.progress_percent(),
            });
        }

        store.mark_generation_complete();
        reporter.report(ProgressEvent::Completed {
            produced: summary.produced.len(),
            skipped: summary.skipped.len(),
        });
        info!(produced = summary.produced.len(), skipped = summary.skipped.len(), "Generation complete");
        Ok(summary)
    }

    /// Render the phase prompt, call the generator and decode the result
    pub async fn run_phase(
        &self,
        phase: Phase,
        context: &PromptContext,
        system: &str,
        credential: &str,
    ) -> Result<Option<PhaseOutput>, OrchestratorError> {
        debug!(%phase, "DraftOrchestrator::run_phase: called");
        let prompt = self
            .prompts
            .render(phase.template_name(), context)
            .map_err(|e| OrchestratorError::Prompt {
                phase,
                message: e.to_string(),
            })?;

        let request = GenerationRequest::new(prompt, phase.schema(), system);
        let output = self
            .generator
            .generate_value(&request, credential)
            .await
            .and_then(|value| phase.decode(value));
        Ok(output)
    }
}
