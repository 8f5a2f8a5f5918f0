use std::path::PathBuf;

use thiserror::Error;

/// Strict-mode failures from the pattern store. The permissive operations
/// swallow these and return `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unknown track '{0}'")]
    UnknownTrack(String),
    #[error("step {step} out of range for {step_count}-step pattern")]
    StepOutOfRange { step: usize, step_count: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("bpm must be a positive number, got {0}")]
    InvalidBpm(f64),
    #[error("step count must be at least 1")]
    InvalidStepCount,
    #[error("at least one track is required")]
    NoTracks,
    #[error("track '{0}' is declared more than once")]
    DuplicateTrack(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine thread disconnected")]
    Disconnected,
    #[error("could not start engine thread: {0}")]
    Spawn(#[from] std::io::Error),
}
