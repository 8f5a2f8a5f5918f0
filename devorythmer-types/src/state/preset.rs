//! Preset catalog types and the stock presets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::euclidean::generate_rotated;
use super::pattern::{Pattern, DEFAULT_STEPS};

/// How a preset describes one track's lane.
///
/// In TOML a literal lane is an array of 0/1 values, a Euclidean lane is an
/// inline table: `kick = { steps = 16, pulses = 5 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetLane {
    /// Hand-authored grid; any non-zero value is a hit.
    Literal(Vec<u8>),
    Euclidean {
        steps: usize,
        pulses: usize,
        #[serde(default)]
        rotation: usize,
    },
}

impl PresetLane {
    pub fn euclidean(steps: usize, pulses: usize) -> Self {
        Self::Euclidean {
            steps,
            pulses,
            rotation: 0,
        }
    }

    /// Produce a fresh pattern. Euclidean lanes are generated on every call,
    /// literal lanes are copied, so the template itself is never shared.
    pub fn render(&self) -> Pattern {
        match self {
            Self::Literal(cells) => Pattern::from_steps(cells.iter().map(|&c| c != 0).collect()),
            Self::Euclidean {
                steps,
                pulses,
                rotation,
            } => Pattern::from_steps(generate_rotated(*steps, *pulses, *rotation)),
        }
    }

    /// Number of steps the lane renders to.
    pub fn len(&self) -> usize {
        match self {
            Self::Literal(cells) => cells.len(),
            Self::Euclidean { steps, .. } => *steps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, immutable pattern template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Lanes keyed by track name. Tracks without a lane load silent.
    #[serde(default)]
    pub lanes: BTreeMap<String, PresetLane>,
}

impl Preset {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            lanes: BTreeMap::new(),
        }
    }

    pub fn with_lane(mut self, track: impl Into<String>, lane: PresetLane) -> Self {
        self.lanes.insert(track.into(), lane);
        self
    }

    fn grid(self, track: &str, cells: [u8; DEFAULT_STEPS]) -> Self {
        self.with_lane(track, PresetLane::Literal(cells.to_vec()))
    }

    fn euclid(self, track: &str, pulses: usize) -> Self {
        self.with_lane(track, PresetLane::euclidean(DEFAULT_STEPS, pulses))
    }

    pub fn lane(&self, track: &str) -> Option<&PresetLane> {
        self.lanes.get(track)
    }

    /// Whether every lane is generated rather than hand-authored.
    pub fn is_euclidean(&self) -> bool {
        !self.lanes.is_empty()
            && self
                .lanes
                .values()
                .all(|lane| matches!(lane, PresetLane::Euclidean { .. }))
    }
}

/// The stock catalog: three hand-written grooves and four Euclidean sets,
/// all laid out for the kick/snare/hihat/bass kit.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::new("P1", "techno")
            .grid("kick", [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0])
            .grid("snare", [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0])
            .grid("hihat", [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0])
            .grid("bass", [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0]),
        Preset::new("P2", "breakbeat")
            .grid("kick", [1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0])
            .grid("snare", [0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0])
            .grid("hihat", [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0])
            .grid("bass", [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0]),
        Preset::new("P3", "house")
            .grid("kick", [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0])
            .grid("snare", [0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0])
            .grid("hihat", [0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1])
            .grid("bass", [1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0]),
        Preset::new("P4", "euclidean, spaced kick")
            .euclid("kick", 5)
            .euclid("snare", 3)
            .euclid("hihat", 11)
            .euclid("bass", 7),
        Preset::new("P5", "euclidean, west african feel")
            .euclid("kick", 4)
            .euclid("snare", 6)
            .euclid("hihat", 13)
            .euclid("bass", 9),
        Preset::new("P6", "euclidean, minimal")
            .euclid("kick", 3)
            .euclid("snare", 2)
            .euclid("hihat", 7)
            .euclid("bass", 5),
        Preset::new("P7", "euclidean, busy")
            .euclid("kick", 6)
            .euclid("snare", 4)
            .euclid("hihat", 15)
            .euclid("bass", 8),
    ]
}
