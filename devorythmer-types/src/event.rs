//! Outbound notifications emitted by the sequencer.

use serde::{Deserialize, Serialize};

/// One notification from the sequencer.
///
/// Within a single tick listeners always see `StepStart` before any trigger
/// and `StepPlay` after all triggers, both carrying the step that was just
/// played rather than the advanced cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SequencerEvent {
    Play,
    Stop,
    /// Clear any per-step state left over from the previous tick.
    StepStart { step: usize },
    #[serde(rename_all = "camelCase")]
    StepPlay {
        step: usize,
        active_tracks: Vec<String>,
    },
}

impl SequencerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Stop => "stop",
            Self::StepStart { .. } => "stepStart",
            Self::StepPlay { .. } => "stepPlay",
        }
    }

    /// Step index carried by step events.
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::StepStart { step } | Self::StepPlay { step, .. } => Some(*step),
            Self::Play | Self::Stop => None,
        }
    }
}
