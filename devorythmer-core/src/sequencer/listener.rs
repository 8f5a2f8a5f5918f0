//! Collaborators the sequencer calls out to on every tick.

use crossbeam_channel::Sender;

use devorythmer_types::SequencerEvent;

/// Receives sequencer notifications (presentation layers, loggers, tests).
pub trait SequencerListener: Send {
    fn on_event(&mut self, event: &SequencerEvent);

    /// Closed listeners are dropped after the current notification.
    fn is_closed(&self) -> bool {
        false
    }
}

impl<F> SequencerListener for F
where
    F: FnMut(&SequencerEvent) + Send,
{
    fn on_event(&mut self, event: &SequencerEvent) {
        self(event)
    }
}

/// Forwards events into a channel; closes once the receiver is dropped.
pub struct ChannelListener {
    tx: Sender<SequencerEvent>,
    closed: bool,
}

impl ChannelListener {
    pub fn new(tx: Sender<SequencerEvent>) -> Self {
        Self { tx, closed: false }
    }
}

impl SequencerListener for ChannelListener {
    fn on_event(&mut self, event: &SequencerEvent) {
        if self.tx.send(event.clone()).is_err() {
            self.closed = true;
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Plays one track's sound. Implementations own their failures: a missing
/// sample is the sink's problem to log, the sequencer never hears of it.
pub trait TriggerSink: Send {
    fn trigger(&mut self, track: &str);
}

impl<F> TriggerSink for F
where
    F: FnMut(&str) + Send,
{
    fn trigger(&mut self, track: &str) {
        self(track)
    }
}

/// Sink that drops every trigger.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TriggerSink for NullSink {
    fn trigger(&mut self, _track: &str) {}
}
