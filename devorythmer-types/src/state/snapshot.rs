use serde::{Deserialize, Serialize};

use super::pattern::{TrackPattern, TrackState};

/// Read-only view of the whole machine, handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub playing: bool,
    pub current_step: usize,
    pub bpm: f64,
    pub step_count: usize,
    pub patterns: Vec<TrackPattern>,
    pub track_states: Vec<TrackState>,
    /// Name of the last preset requested, if any.
    pub preset: Option<String>,
}
