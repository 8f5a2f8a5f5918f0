//! Trigger sink for the headless binary: no audio, just the log.

use devorythmer_core::TriggerSink;

/// Logs every trigger at debug level under the `audio` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TriggerSink for LogSink {
    fn trigger(&mut self, track: &str) {
        log::debug!(target: "audio", "playing {}", track);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devorythmer_core::{DrumMachine, EngineConfig};

    #[test]
    fn drives_a_machine_without_audio() {
        let mut machine =
            DrumMachine::with_sink(&EngineConfig::default(), Box::new(LogSink)).unwrap();
        assert!(machine.play());
        // P1 step 0 fires kick and bass through the sink
        assert_eq!(machine.tick(), Some(0));
        assert_eq!(machine.current_step(), 1);
    }
}
