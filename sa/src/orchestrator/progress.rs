//! Progress reporting for a generation run

use tracing::debug;

use super::Phase;

/// Observable activity during a generation run
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// A phase is about to call the endpoint
    PhaseStarted { phase: Phase, message: String },
    /// A phase has run; `produced` is false when it yielded nothing
    PhaseFinished { phase: Phase, produced: bool, percent: u8 },
    /// All six phases have run
    Completed { produced: usize, skipped: usize },
}

/// Receives progress as the orchestrator runs
pub trait ProgressReporter: Send {
    fn report(&mut self, event: ProgressEvent);
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn report(&mut self, event: ProgressEvent) {
        debug!(?event, "NullReporter::report: dropped");
    }
}

/// Keeps every event, in order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ProgressEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentages reported so far
    pub fn percents(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::PhaseFinished { percent, .. } => Some(*percent),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&mut self, event: ProgressEvent) {
        self.events.push(event);
    }
}
