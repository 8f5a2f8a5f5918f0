pub mod pattern_store;

pub use pattern_store::PatternStore;

// Re-export shared data types so crate::state covers the whole model
pub use devorythmer_types::{Pattern, Preset, PresetLane, TrackPattern, TrackState};
