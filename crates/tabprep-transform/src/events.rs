//! Structured pipeline events and the observer hook.
//!
//! The pipeline never configures logging itself. It reports what happens as
//! [`PipelineEvent`]s to a [`PipelineObserver`] chosen by the caller.
//! [`TracingObserver`] renders them through `tracing`; [`RecordingObserver`]
//! keeps them for reports and tests. A tuple of two observers forwards every
//! event to both.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::executors::TransformSummary;

/// Lifecycle state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    RunStarted {
        transforms: usize,
        rows: usize,
        columns: usize,
    },
    TransformApplied {
        index: usize,
        name: String,
        kind: &'static str,
        source: String,
        output: String,
        summary: TransformSummary,
    },
    RunCompleted {
        rows: usize,
        columns: Vec<String>,
    },
    RunFailed {
        error: String,
    },
}

impl PipelineEvent {
    /// State the run is in once this event has been emitted.
    pub fn state(&self) -> RunState {
        match self {
            Self::RunStarted { .. } | Self::TransformApplied { .. } => RunState::Running,
            Self::RunCompleted { .. } => RunState::Completed,
            Self::RunFailed { .. } => RunState::Failed,
        }
    }
}

/// Receiver of pipeline events.
pub trait PipelineObserver {
    fn on_event(&mut self, event: &PipelineEvent);
}

impl<A, B> PipelineObserver for (A, B)
where
    A: PipelineObserver,
    B: PipelineObserver,
{
    fn on_event(&mut self, event: &PipelineEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}

/// Renders events as `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::RunStarted {
                transforms,
                rows,
                columns,
            } => {
                info!(transforms, rows, columns, "pipeline run started");
            }
            PipelineEvent::TransformApplied {
                index,
                name,
                kind,
                source,
                output,
                summary,
            } => {
                info!(index, name = %name, kind, source = %source, output = %output, "transform applied");
                match summary {
                    TransformSummary::Standardize {
                        mean,
                        std_dev,
                        observed,
                        missing,
                    } => debug!(mean, std_dev, observed, missing, "standardization statistics"),
                    TransformSummary::Encode {
                        vocabulary,
                        reserved,
                    } => debug!(
                        categories = vocabulary.len(),
                        reserved,
                        "category vocabulary built"
                    ),
                    TransformSummary::Fill { filled } => {
                        debug!(filled, "missing values filled");
                    }
                }
            }
            PipelineEvent::RunCompleted { rows, columns } => {
                info!(rows, columns = columns.len(), "pipeline run completed");
            }
            PipelineEvent::RunFailed { error } => {
                warn!(error = %error, "pipeline run failed");
            }
        }
    }
}

/// Keeps every event in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<PipelineEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PipelineEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<PipelineEvent> {
        self.events
    }

    /// State after the last recorded event (`Idle` before any).
    pub fn state(&self) -> RunState {
        self.events
            .last()
            .map_or(RunState::Idle, PipelineEvent::state)
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_event(&mut self, event: &PipelineEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_state_follows_events() {
        let mut observer = RecordingObserver::new();
        assert_eq!(observer.state(), RunState::Idle);

        observer.on_event(&PipelineEvent::RunStarted {
            transforms: 1,
            rows: 2,
            columns: 1,
        });
        assert_eq!(observer.state(), RunState::Running);

        observer.on_event(&PipelineEvent::RunFailed {
            error: "boom".to_string(),
        });
        assert_eq!(observer.state(), RunState::Failed);
        assert_eq!(observer.events().len(), 2);
    }

    #[test]
    fn test_pair_forwards_to_both() {
        let mut pair = (RecordingObserver::new(), RecordingObserver::new());
        pair.on_event(&PipelineEvent::RunCompleted {
            rows: 0,
            columns: Vec::new(),
        });
        assert_eq!(pair.0.events().len(), 1);
        assert_eq!(pair.1.events().len(), 1);
    }
}
