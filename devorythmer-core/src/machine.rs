//! The top-level drum machine value: one pattern store, one sequencer.

use std::time::Duration;

use devorythmer_types::{MachineSnapshot, TrackPattern, TrackState};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::sequencer::{Sequencer, SequencerListener, TriggerSink};
use crate::state::PatternStore;

/// Owns all runtime state. Construct one per process and hand it to whatever
/// drives ticks; there is no global instance.
pub struct DrumMachine {
    store: PatternStore,
    sequencer: Sequencer,
}

impl DrumMachine {
    /// Validate `config`, then build the store (with the default preset
    /// loaded) and a stopped sequencer.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: PatternStore::from_config(config),
            sequencer: Sequencer::new(config.bpm, config.step_count)?,
        })
    }

    pub fn with_sink(config: &EngineConfig, sink: Box<dyn TriggerSink>) -> Result<Self, ConfigError> {
        let mut machine = Self::new(config)?;
        machine.set_sink(sink);
        Ok(machine)
    }

    pub fn set_sink(&mut self, sink: Box<dyn TriggerSink>) {
        self.sequencer.set_sink(sink);
    }

    pub fn add_listener(&mut self, listener: Box<dyn SequencerListener>) {
        self.sequencer.add_listener(listener);
    }

    /// Listeners still registered; closed ones are dropped on the next event.
    pub fn listener_count(&self) -> usize {
        self.sequencer.listener_count()
    }

    pub fn toggle_step(&mut self, track: &str, step: usize) -> bool {
        self.store.toggle_step(track, step)
    }

    pub fn toggle_track(&mut self, track: &str) -> bool {
        self.store.toggle_track(track)
    }

    pub fn load_preset(&mut self, name: &str) -> bool {
        self.store.load_preset(name)
    }

    pub fn play(&mut self) -> bool {
        self.sequencer.play()
    }

    pub fn stop(&mut self) -> bool {
        self.sequencer.stop()
    }

    pub fn tick(&mut self) -> Option<usize> {
        self.sequencer.tick(&self.store)
    }

    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    pub fn current_step(&self) -> usize {
        self.sequencer.current_step()
    }

    pub fn step_time(&self) -> Duration {
        self.sequencer.step_time()
    }

    pub fn all_patterns(&self) -> Vec<TrackPattern> {
        self.store.all_patterns()
    }

    pub fn all_track_states(&self) -> Vec<TrackState> {
        self.store.all_track_states()
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            playing: self.sequencer.is_playing(),
            current_step: self.sequencer.current_step(),
            bpm: self.sequencer.bpm(),
            step_count: self.store.step_count(),
            patterns: self.store.all_patterns(),
            track_states: self.store.all_track_states(),
            preset: self.store.current_preset().map(str::to_string),
        }
    }
}
