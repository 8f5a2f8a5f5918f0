//! Transport state machine: play/stop, the step cursor, and per-tick
//! notification ordering.
//!
//! The sequencer does not own a timer. Whoever drives it (the engine thread,
//! or a test) calls [`Sequencer::tick`] once per `step_time` while playing and
//! arms/cancels its tick source from the return values of `play`/`stop`.

pub mod listener;

use std::time::Duration;

use devorythmer_types::SequencerEvent;

use crate::error::ConfigError;
use crate::state::PatternStore;
pub use listener::{ChannelListener, NullSink, SequencerListener, TriggerSink};

/// Duration of one sixteenth note, `(60 / bpm / 4)` seconds.
pub fn step_time_for(bpm: f64) -> Result<Duration, ConfigError> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(ConfigError::InvalidBpm(bpm));
    }
    Ok(Duration::from_secs_f64(60.0 / bpm / 4.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
}

pub struct Sequencer {
    state: TransportState,
    current_step: usize,
    step_count: usize,
    bpm: f64,
    step_time: Duration,
    listeners: Vec<Box<dyn SequencerListener>>,
    sink: Box<dyn TriggerSink>,
}

impl Sequencer {
    /// Fails on a non-positive tempo or an empty bar.
    pub fn new(bpm: f64, step_count: usize) -> Result<Self, ConfigError> {
        let step_time = step_time_for(bpm)?;
        if step_count == 0 {
            return Err(ConfigError::InvalidStepCount);
        }
        Ok(Self {
            state: TransportState::Stopped,
            current_step: 0,
            step_count,
            bpm,
            step_time,
            listeners: Vec::new(),
            sink: Box::new(NullSink),
        })
    }

    pub fn set_sink(&mut self, sink: Box<dyn TriggerSink>) {
        self.sink = sink;
    }

    pub fn add_listener(&mut self, listener: Box<dyn SequencerListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Start from step 0. Returns `false` (and emits nothing) if already
    /// playing.
    pub fn play(&mut self) -> bool {
        if self.state == TransportState::Playing {
            return false;
        }
        self.current_step = 0;
        self.state = TransportState::Playing;
        log::info!(target: "sequencer", "play - bpm {}, step {:?}", self.bpm, self.step_time);
        self.emit(SequencerEvent::Play);
        true
    }

    /// Stop, leaving the cursor where it is. Returns `false` if already
    /// stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == TransportState::Stopped {
            return false;
        }
        self.state = TransportState::Stopped;
        log::info!(target: "sequencer", "stop at step {}", self.current_step);
        self.emit(SequencerEvent::Stop);
        true
    }

    /// Play the current step and advance. Ignored while stopped.
    ///
    /// Order within a tick: `StepStart`, one trigger per active track in
    /// declaration order, `StepPlay`, then the cursor advances. Returns the
    /// step that was played.
    pub fn tick(&mut self, store: &PatternStore) -> Option<usize> {
        if self.state != TransportState::Playing {
            return None;
        }
        let step = self.current_step;
        self.emit(SequencerEvent::StepStart { step });

        let active_tracks = store.active_tracks_at(step);
        for track in &active_tracks {
            self.sink.trigger(track);
        }

        self.emit(SequencerEvent::StepPlay {
            step,
            active_tracks,
        });

        self.current_step = (step + 1) % self.step_count;
        log::trace!(target: "sequencer", "step {} -> {}", step, self.current_step);
        Some(step)
    }

    fn emit(&mut self, event: SequencerEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
        self.listeners.retain(|l| !l.is_closed());
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn step_time(&self) -> Duration {
        self.step_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use std::sync::{Arc, Mutex};

    fn recorder(seq: &mut Sequencer) -> Arc<Mutex<Vec<String>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::clone(&log);
        seq.add_listener(Box::new(move |e: &SequencerEvent| {
            let entry = match e.step() {
                Some(step) => format!("{}:{}", e.name(), step),
                None => e.name().to_string(),
            };
            events.lock().unwrap().push(entry);
        }));
        let triggers = Arc::clone(&log);
        seq.set_sink(Box::new(move |track: &str| {
            triggers.lock().unwrap().push(format!("trigger:{}", track));
        }));
        log
    }

    fn p1_store() -> PatternStore {
        PatternStore::from_config(&EngineConfig::default())
    }

    #[test]
    fn test_step_time() {
        assert_eq!(step_time_for(120.0).unwrap(), Duration::from_millis(125));
        assert_eq!(step_time_for(60.0).unwrap(), Duration::from_millis(250));
        assert_eq!(Sequencer::new(120.0, 16).unwrap().step_time(), Duration::from_millis(125));
    }

    #[test]
    fn test_rejects_bad_tempo_and_empty_bar() {
        assert!(matches!(step_time_for(0.0), Err(ConfigError::InvalidBpm(_))));
        assert!(matches!(step_time_for(f64::INFINITY), Err(ConfigError::InvalidBpm(_))));
        assert!(matches!(Sequencer::new(-10.0, 16), Err(ConfigError::InvalidBpm(_))));
        assert!(matches!(Sequencer::new(120.0, 0), Err(ConfigError::InvalidStepCount)));
    }

    #[test]
    fn test_initial_state() {
        let seq = Sequencer::new(120.0, 16).unwrap();
        assert_eq!(seq.state(), TransportState::Stopped);
        assert!(!seq.is_playing());
        assert_eq!(seq.current_step(), 0);
    }

    #[test]
    fn test_tick_while_stopped_does_nothing() {
        let store = p1_store();
        let mut seq = Sequencer::new(120.0, 16).unwrap();
        let log = recorder(&mut seq);
        assert_eq!(seq.tick(&store), None);
        assert_eq!(seq.current_step(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cursor_advances_modulo_step_count() {
        let store = p1_store();
        let mut seq = Sequencer::new(120.0, 16).unwrap();
        assert!(seq.play());
        for k in 1..=40 {
            seq.tick(&store);
            assert_eq!(seq.current_step(), k % 16);
        }
    }

    #[test]
    fn test_play_resets_cursor() {
        let store = p1_store();
        let mut seq = Sequencer::new(120.0, 16).unwrap();
        seq.play();
        for _ in 0..5 {
            seq.tick(&store);
        }
        assert!(seq.stop());
        // stop leaves the cursor alone
        assert_eq!(seq.current_step(), 5);
        assert!(seq.play());
        assert_eq!(seq.current_step(), 0);
    }

    #[test]
    fn test_play_and_stop_are_idempotent() {
        let store = p1_store();
        let mut seq = Sequencer::new(120.0, 16).unwrap();
        let log = recorder(&mut seq);

        assert!(!seq.stop());
        assert!(seq.play());
        seq.tick(&store);
        seq.tick(&store);
        assert!(!seq.play());
        assert_eq!(seq.current_step(), 2);
        assert!(seq.stop());
        assert!(!seq.stop());

        let log = log.lock().unwrap();
        assert_eq!(log.iter().filter(|e| *e == "play").count(), 1);
        assert_eq!(log.iter().filter(|e| *e == "stop").count(), 1);
    }

    #[test]
    fn test_tick_ordering() {
        let store = p1_store();
        let mut seq = Sequencer::new(120.0, 16).unwrap();
        let log = recorder(&mut seq);
        seq.play();
        assert_eq!(seq.tick(&store), Some(0));
        assert_eq!(seq.tick(&store), Some(1));
        seq.stop();
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "play",
                "stepStart:0",
                "trigger:kick",
                "trigger:bass",
                "stepPlay:0",
                "stepStart:1",
                "stepPlay:1",
                "stop",
            ]
        );
    }

    #[test]
    fn test_closed_listeners_are_dropped() {
        let store = p1_store();
        let mut seq = Sequencer::new(120.0, 16).unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();
        seq.add_listener(Box::new(ChannelListener::new(tx)));
        assert_eq!(seq.listener_count(), 1);
        drop(rx);
        seq.play();
        seq.tick(&store);
        assert_eq!(seq.listener_count(), 0);
    }
}
