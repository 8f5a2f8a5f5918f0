//! Step pattern types.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STEPS: usize = 16;

/// On/off hits for a single track, one entry per step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern {
    steps: Vec<bool>,
}

impl Pattern {
    /// An all-rest pattern of `length` steps.
    pub fn new(length: usize) -> Self {
        Self {
            steps: vec![false; length],
        }
    }

    pub fn from_steps(steps: Vec<bool>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[bool] {
        &self.steps
    }

    /// Whether `step` is a hit. Out-of-range steps are rests.
    pub fn is_active(&self, step: usize) -> bool {
        self.steps.get(step).copied().unwrap_or(false)
    }

    /// Flip one step and return its new value, or `None` if out of range.
    pub fn toggle(&mut self, step: usize) -> Option<bool> {
        let slot = self.steps.get_mut(step)?;
        *slot = !*slot;
        Some(*slot)
    }

    pub fn hit_count(&self) -> usize {
        self.steps.iter().filter(|&&hit| hit).count()
    }

    /// Truncate or pad with rests so the pattern has exactly `length` steps.
    pub fn fit_to(&mut self, length: usize) {
        self.steps.resize(length, false);
    }

    /// Compact `x.x.` rendering, handy for logs and terminals.
    pub fn to_grid_string(&self) -> String {
        self.steps
            .iter()
            .map(|&hit| if hit { 'x' } else { '.' })
            .collect()
    }
}

/// Snapshot of one track's pattern, for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPattern {
    pub track: String,
    pub steps: Vec<bool>,
}

/// Snapshot of one track's mute state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackState {
    pub track: String,
    pub enabled: bool,
}
