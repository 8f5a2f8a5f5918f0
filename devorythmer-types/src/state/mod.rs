pub mod euclidean;
pub mod pattern;
pub mod preset;
pub mod snapshot;

pub use euclidean::{generate, generate_rotated};
pub use pattern::{Pattern, TrackPattern, TrackState, DEFAULT_STEPS};
pub use preset::{builtin_presets, Preset, PresetLane};
pub use snapshot::MachineSnapshot;
