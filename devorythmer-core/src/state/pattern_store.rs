//! Per-track step grids and mute flags.

use devorythmer_types::{Pattern, Preset, TrackPattern, TrackState};

use crate::config::EngineConfig;
use crate::error::PatternError;

/// Owns every track's pattern and enabled flag.
///
/// Tracks are fixed at construction and every pattern is exactly
/// `step_count` long for the store's whole life. Presets replace patterns
/// wholesale but never touch the enabled flags.
#[derive(Debug, Clone)]
pub struct PatternStore {
    tracks: Vec<String>,
    step_count: usize,
    patterns: Vec<Pattern>,
    enabled: Vec<bool>,
    presets: Vec<Preset>,
    current_preset: Option<String>,
}

impl PatternStore {
    /// Silent patterns, all tracks enabled. `tracks` must be unique.
    pub fn new(tracks: Vec<String>, step_count: usize, presets: Vec<Preset>) -> Self {
        let patterns = (0..tracks.len()).map(|_| Pattern::new(step_count)).collect();
        let enabled = vec![true; tracks.len()];
        Self {
            tracks,
            step_count,
            patterns,
            enabled,
            presets,
            current_preset: None,
        }
    }

    /// Build from a validated config and load its default preset.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut store = Self::new(config.tracks.clone(), config.step_count, config.presets.clone());
        if let Some(name) = &config.default_preset {
            store.load_preset(name);
        }
        store
    }

    /// One all-rest pattern per track.
    pub fn create_empty(&self) -> Vec<Pattern> {
        (0..self.tracks.len())
            .map(|_| Pattern::new(self.step_count))
            .collect()
    }

    fn track_index(&self, track: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t == track)
    }

    pub fn try_toggle_step(&mut self, track: &str, step: usize) -> Result<bool, PatternError> {
        let idx = self
            .track_index(track)
            .ok_or_else(|| PatternError::UnknownTrack(track.to_string()))?;
        self.patterns[idx]
            .toggle(step)
            .ok_or(PatternError::StepOutOfRange {
                step,
                step_count: self.step_count,
            })
    }

    /// Flip one step and return its new value. Unknown tracks and
    /// out-of-range steps change nothing and report `false`.
    pub fn toggle_step(&mut self, track: &str, step: usize) -> bool {
        match self.try_toggle_step(track, step) {
            Ok(active) => {
                log::debug!(target: "pattern", "{} step {}: {}", track, step, if active { "on" } else { "off" });
                active
            }
            Err(e) => {
                log::warn!(target: "pattern", "toggle step ignored: {}", e);
                false
            }
        }
    }

    pub fn try_toggle_track(&mut self, track: &str) -> Result<bool, PatternError> {
        let idx = self
            .track_index(track)
            .ok_or_else(|| PatternError::UnknownTrack(track.to_string()))?;
        self.enabled[idx] = !self.enabled[idx];
        Ok(self.enabled[idx])
    }

    /// Flip a track's enabled flag and return it; `false` for unknown tracks.
    pub fn toggle_track(&mut self, track: &str) -> bool {
        match self.try_toggle_track(track) {
            Ok(enabled) => {
                log::debug!(target: "pattern", "{} track: {}", track, if enabled { "on" } else { "off" });
                enabled
            }
            Err(e) => {
                log::warn!(target: "pattern", "toggle track ignored: {}", e);
                false
            }
        }
    }

    /// Enabled tracks with a hit at `step`, in declaration order.
    pub fn active_tracks_at(&self, step: usize) -> Vec<String> {
        self.tracks
            .iter()
            .zip(&self.patterns)
            .zip(&self.enabled)
            .filter(|((_, pattern), enabled)| **enabled && pattern.is_active(step))
            .map(|((track, _), _)| track.clone())
            .collect()
    }

    /// Replace every pattern with a fresh copy of the named preset. Unknown
    /// names load silence. Returns whether the preset was found.
    pub fn load_preset(&mut self, name: &str) -> bool {
        self.current_preset = Some(name.to_string());
        let Some(preset) = self.presets.iter().find(|p| p.name == name) else {
            self.patterns = self.create_empty();
            log::info!(target: "pattern", "unknown preset '{}', loaded empty pattern", name);
            return false;
        };

        let patterns = self
            .tracks
            .iter()
            .map(|track| match preset.lane(track) {
                Some(lane) => {
                    let mut pattern = lane.render();
                    if pattern.len() != self.step_count {
                        log::warn!(
                            target: "pattern",
                            "preset {} lane {} has {} steps, fitting to {}",
                            name, track, pattern.len(), self.step_count
                        );
                        pattern.fit_to(self.step_count);
                    }
                    pattern
                }
                None => Pattern::new(self.step_count),
            })
            .collect();
        self.patterns = patterns;
        log::info!(target: "pattern", "preset {} loaded", name);
        true
    }

    pub fn all_patterns(&self) -> Vec<TrackPattern> {
        self.tracks
            .iter()
            .zip(&self.patterns)
            .map(|(track, pattern)| TrackPattern {
                track: track.clone(),
                steps: pattern.steps().to_vec(),
            })
            .collect()
    }

    pub fn all_track_states(&self) -> Vec<TrackState> {
        self.tracks
            .iter()
            .zip(&self.enabled)
            .map(|(track, &enabled)| TrackState {
                track: track.clone(),
                enabled,
            })
            .collect()
    }

    pub fn pattern(&self, track: &str) -> Option<&Pattern> {
        self.track_index(track).map(|idx| &self.patterns[idx])
    }

    pub fn is_track_enabled(&self, track: &str) -> Option<bool> {
        self.track_index(track).map(|idx| self.enabled[idx])
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn track_names(&self) -> &[String] {
        &self.tracks
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Last preset requested through [`PatternStore::load_preset`].
    pub fn current_preset(&self) -> Option<&str> {
        self.current_preset.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devorythmer_types::{builtin_presets, generate, PresetLane};

    fn bits(cells: &[u8]) -> Vec<bool> {
        cells.iter().map(|&c| c != 0).collect()
    }

    fn store() -> PatternStore {
        PatternStore::from_config(&EngineConfig::default())
    }

    fn empty_store() -> PatternStore {
        let config = EngineConfig::default();
        PatternStore::new(config.tracks, config.step_count, config.presets)
    }

    #[test]
    fn test_new_store_is_silent_and_enabled() {
        let store = empty_store();
        assert_eq!(store.step_count(), 16);
        assert_eq!(store.track_names(), &["kick", "snare", "hihat", "bass"]);
        for pattern in store.all_patterns() {
            assert_eq!(pattern.steps, vec![false; 16]);
        }
        assert!(store.all_track_states().iter().all(|s| s.enabled));
        assert!(store.current_preset().is_none());
    }

    #[test]
    fn test_from_config_loads_default_preset() {
        let store = store();
        assert_eq!(store.current_preset(), Some("P1"));
        assert_eq!(store.active_tracks_at(0), vec!["kick", "bass"]);
    }

    #[test]
    fn test_load_p1_exact() {
        let mut store = empty_store();
        assert!(store.load_preset("P1"));
        let patterns = store.all_patterns();
        let expected = [
            ("kick", [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0]),
            ("snare", [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0]),
            ("hihat", [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0]),
            ("bass", [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0]),
        ];
        assert_eq!(patterns.len(), expected.len());
        for (pattern, (track, cells)) in patterns.iter().zip(expected.iter()) {
            assert_eq!(pattern.track, *track);
            assert_eq!(pattern.steps, bits(cells));
        }
    }

    #[test]
    fn test_load_euclidean_preset() {
        let mut store = empty_store();
        assert!(store.load_preset("P4"));
        assert_eq!(store.pattern("kick").unwrap().steps(), generate(16, 5).as_slice());
        assert_eq!(store.pattern("snare").unwrap().steps(), generate(16, 3).as_slice());
        assert_eq!(store.pattern("hihat").unwrap().steps(), generate(16, 11).as_slice());
        assert_eq!(store.pattern("bass").unwrap().steps(), generate(16, 7).as_slice());
    }

    #[test]
    fn test_unknown_preset_loads_empty_and_keeps_track_states() {
        let mut store = store();
        store.toggle_track("snare");
        assert!(!store.load_preset("unknown-xyz"));
        for pattern in store.all_patterns() {
            assert_eq!(pattern.steps, vec![false; 16]);
        }
        assert_eq!(store.is_track_enabled("snare"), Some(false));
        assert_eq!(store.is_track_enabled("kick"), Some(true));
        assert_eq!(store.current_preset(), Some("unknown-xyz"));
    }

    #[test]
    fn test_load_preset_keeps_track_states() {
        let mut store = store();
        store.toggle_track("kick");
        store.load_preset("P3");
        assert_eq!(store.is_track_enabled("kick"), Some(false));
    }

    #[test]
    fn test_edits_do_not_leak_into_preset() {
        let mut store = store();
        assert!(!store.pattern("kick").unwrap().is_active(1));
        assert!(store.toggle_step("kick", 1));
        store.load_preset("P1");
        assert!(!store.pattern("kick").unwrap().is_active(1));
        assert_eq!(store.presets(), builtin_presets().as_slice());
    }

    #[test]
    fn test_toggle_step_is_an_involution() {
        let mut store = store();
        let before = store.all_patterns();
        for track in ["kick", "snare", "hihat", "bass"] {
            for step in 0..16 {
                let before = store.pattern(track).unwrap().is_active(step);
                assert_eq!(store.toggle_step(track, step), !before);
                assert_eq!(store.toggle_step(track, step), before);
            }
        }
        assert_eq!(store.all_patterns(), before);
    }

    #[test]
    fn test_toggle_step_unknown_track() {
        let mut store = store();
        let before = store.all_patterns();
        assert!(!store.toggle_step("cowbell", 0));
        assert_eq!(store.all_patterns(), before);
        assert_eq!(
            store.try_toggle_step("cowbell", 0),
            Err(PatternError::UnknownTrack("cowbell".into()))
        );
    }

    #[test]
    fn test_toggle_step_out_of_range() {
        let mut store = store();
        let before = store.all_patterns();
        assert!(!store.toggle_step("kick", 16));
        assert_eq!(store.all_patterns(), before);
        assert_eq!(
            store.try_toggle_step("kick", 16),
            Err(PatternError::StepOutOfRange {
                step: 16,
                step_count: 16
            })
        );
    }

    #[test]
    fn test_toggle_track() {
        let mut store = store();
        assert!(!store.toggle_track("hihat"));
        assert_eq!(store.is_track_enabled("hihat"), Some(false));
        assert!(store.toggle_track("hihat"));
        assert!(!store.toggle_track("cowbell"));
        assert!(store.try_toggle_track("cowbell").is_err());
        assert_eq!(store.is_track_enabled("cowbell"), None);
    }

    #[test]
    fn test_muting_hides_track_without_touching_bits() {
        let mut store = store();
        let before = store.all_patterns();
        store.toggle_track("kick");
        for step in 0..16 {
            assert!(!store.active_tracks_at(step).contains(&"kick".to_string()));
        }
        store.toggle_track("kick");
        assert_eq!(store.all_patterns(), before);
        assert_eq!(store.active_tracks_at(0), vec!["kick", "bass"]);
        assert_eq!(store.active_tracks_at(4), vec!["kick", "snare"]);
    }

    #[test]
    fn test_active_tracks_follow_declaration_order() {
        let presets = vec![Preset::new("all", "")
            .with_lane("bass", PresetLane::euclidean(4, 4))
            .with_lane("kick", PresetLane::euclidean(4, 4))];
        let mut store = PatternStore::new(vec!["kick".into(), "bass".into()], 4, presets);
        store.load_preset("all");
        assert_eq!(store.active_tracks_at(2), vec!["kick", "bass"]);
        assert!(store.active_tracks_at(4).is_empty());
    }

    #[test]
    fn test_short_lanes_are_fitted() {
        let presets = vec![Preset::new("short", "")
            .with_lane("kick", PresetLane::Literal(vec![1, 0, 1]))
            .with_lane("snare", PresetLane::euclidean(16, 4))];
        let mut store = PatternStore::new(vec!["kick".into(), "snare".into(), "clap".into()], 8, presets);
        assert!(store.load_preset("short"));
        assert_eq!(store.pattern("kick").unwrap().to_grid_string(), "x.x.....");
        assert_eq!(store.pattern("snare").unwrap().to_grid_string(), "x...x...");
        assert_eq!(store.pattern("clap").unwrap().to_grid_string(), "........");
    }

    #[test]
    fn test_create_empty() {
        let store = store();
        let empty = store.create_empty();
        assert_eq!(empty.len(), 4);
        assert!(empty.iter().all(|p| p.len() == 16 && p.hit_count() == 0));
    }
}
