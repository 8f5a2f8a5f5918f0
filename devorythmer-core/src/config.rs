use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::sequencer::step_time_for;
use devorythmer_types::{builtin_presets, Preset, DEFAULT_STEPS};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

pub const DEFAULT_BPM: f64 = 120.0;
pub const DEFAULT_TRACKS: [&str; 4] = ["kick", "snare", "hihat", "bass"];
pub const DEFAULT_PRESET: &str = "P1";

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    presets: Vec<Preset>,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    bpm: Option<f64>,
    step_count: Option<usize>,
    tracks: Option<Vec<String>>,
    default_preset: Option<String>,
}

/// Layered configuration: the embedded `config.toml` merged with the user's
/// override file.
pub struct Config {
    defaults: DefaultsConfig,
    presets: Vec<Preset>,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(user_config_path().as_deref())
    }

    /// Load the embedded defaults, then merge `path` over them if it exists.
    /// A malformed or unreadable user file is logged and ignored.
    pub fn load_from(path: Option<&Path>) -> Self {
        let mut config = Self::embedded();

        if let Some(path) = path {
            if path.exists() {
                match read_config_file(path) {
                    Ok(user) => config.merge(user),
                    Err(e) => {
                        log::warn!(target: "config", "ignoring config {}: {}", path.display(), e)
                    }
                }
            }
        }

        config
    }

    /// Embedded defaults merged with `contents`; unlike [`Config::load`]
    /// parse errors are returned.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let user: ConfigFile = toml::from_str(contents)?;
        let mut config = Self::embedded();
        config.merge(user);
        Ok(config)
    }

    fn embedded() -> Self {
        let base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");
        Config {
            defaults: base.defaults,
            presets: base.presets,
        }
    }

    fn merge(&mut self, user: ConfigFile) {
        merge_defaults(&mut self.defaults, user.defaults);
        self.presets.extend(user.presets);
    }

    pub fn bpm(&self) -> f64 {
        self.defaults.bpm.unwrap_or(DEFAULT_BPM)
    }

    pub fn step_count(&self) -> usize {
        self.defaults.step_count.unwrap_or(DEFAULT_STEPS)
    }

    pub fn tracks(&self) -> Vec<String> {
        self.defaults
            .tracks
            .clone()
            .unwrap_or_else(|| DEFAULT_TRACKS.iter().map(|t| t.to_string()).collect())
    }

    pub fn default_preset(&self) -> Option<String> {
        self.defaults.default_preset.clone()
    }

    /// Stock presets with configured presets layered on top. A configured
    /// preset replaces a stock one of the same name, otherwise it is appended.
    pub fn presets(&self) -> Vec<Preset> {
        let mut catalog = builtin_presets();
        for preset in &self.presets {
            match catalog.iter_mut().find(|p| p.name == preset.name) {
                Some(existing) => *existing = preset.clone(),
                None => catalog.push(preset.clone()),
            }
        }
        catalog
    }

    /// Resolve and validate everything the engine needs at construction.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            bpm: self.bpm(),
            step_count: self.step_count(),
            tracks: self.tracks(),
            presets: self.presets(),
            default_preset: self.default_preset(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Construction parameters for a [`crate::DrumMachine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub bpm: f64,
    pub step_count: usize,
    /// Track names in declaration order; this is also the trigger order.
    pub tracks: Vec<String>,
    pub presets: Vec<Preset>,
    /// Preset loaded when the machine is built.
    pub default_preset: Option<String>,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(ConfigError::InvalidBpm(self.bpm));
        }
        if self.step_count == 0 {
            return Err(ConfigError::InvalidStepCount);
        }
        if self.tracks.is_empty() {
            return Err(ConfigError::NoTracks);
        }
        let mut seen = HashSet::new();
        for track in &self.tracks {
            if !seen.insert(track.as_str()) {
                return Err(ConfigError::DuplicateTrack(track.clone()));
            }
        }
        Ok(())
    }

    /// One sixteenth note at the configured tempo.
    pub fn step_time(&self) -> Result<Duration, ConfigError> {
        step_time_for(self.bpm)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            step_count: DEFAULT_STEPS,
            tracks: DEFAULT_TRACKS.iter().map(|t| t.to_string()).collect(),
            presets: builtin_presets(),
            default_preset: Some(DEFAULT_PRESET.to_string()),
        }
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("devorythmer").join("config.toml"))
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.bpm.is_some() {
        base.bpm = user.bpm;
    }
    if user.step_count.is_some() {
        base.step_count = user.step_count;
    }
    if user.tracks.is_some() {
        base.tracks = user.tracks;
    }
    if user.default_preset.is_some() {
        base.default_preset = user.default_preset;
    }
}
