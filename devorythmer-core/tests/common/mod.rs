#![allow(dead_code)]
//! Test harness utilities for devorythmer-core integration tests.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use devorythmer_core::{DrumMachine, EngineConfig};
use devorythmer_types::SequencerEvent;

/// One entry per observable side effect, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Event(SequencerEvent),
    Trigger(String),
}

/// Shared log fed by both a listener and a trigger sink.
#[derive(Clone, Default)]
pub struct Recorder {
    log: Arc<Mutex<Vec<Observed>>>,
}

impl Recorder {
    pub fn attach(&self, machine: &mut DrumMachine) {
        let events = Arc::clone(&self.log);
        machine.add_listener(Box::new(move |e: &SequencerEvent| {
            events.lock().unwrap().push(Observed::Event(e.clone()));
        }));
        let triggers = Arc::clone(&self.log);
        machine.set_sink(Box::new(move |track: &str| {
            triggers.lock().unwrap().push(Observed::Trigger(track.to_string()));
        }));
    }

    pub fn take(&self) -> Vec<Observed> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }

    /// `(step, active_tracks)` of every StepPlay seen so far.
    pub fn step_plays(&self) -> Vec<(usize, Vec<String>)> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|o| match o {
                Observed::Event(SequencerEvent::StepPlay { step, active_tracks }) => {
                    Some((*step, active_tracks.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

/// Default config (4 tracks, 16 steps, P1) at a custom tempo.
pub fn config_at(bpm: f64) -> EngineConfig {
    EngineConfig {
        bpm,
        ..EngineConfig::default()
    }
}

pub fn tracks(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Collect events until `n` StepPlay events have arrived, or panic on timeout.
pub fn collect_step_plays(rx: &Receiver<SequencerEvent>, n: usize, timeout: Duration) -> Vec<SequencerEvent> {
    let start = Instant::now();
    let mut out = Vec::new();
    let mut plays = 0;
    while plays < n {
        let remaining = timeout
            .checked_sub(start.elapsed())
            .unwrap_or_else(|| panic!("Timed out waiting for {} steps (have {})", n, plays));
        let event = rx
            .recv_timeout(remaining)
            .unwrap_or_else(|_| panic!("Timed out waiting for {} steps (have {})", n, plays));
        if matches!(event, SequencerEvent::StepPlay { .. }) {
            plays += 1;
        }
        out.push(event);
    }
    out
}
