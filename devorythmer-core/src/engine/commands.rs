//! Commands sent from the main thread to the engine thread.

use crossbeam_channel::Sender;

use devorythmer_types::{Action, DispatchResult, MachineSnapshot};

use crate::sequencer::{SequencerListener, TriggerSink};

/// Commands either carry their own data or a reply channel for
/// synchronous operations.
pub enum EngineCmd {
    Dispatch {
        action: Action,
        reply: Option<Sender<DispatchResult>>,
    },
    AddListener {
        listener: Box<dyn SequencerListener>,
    },
    SetSink {
        sink: Box<dyn TriggerSink>,
    },
    Snapshot {
        reply: Sender<MachineSnapshot>,
    },
    ListenerCount {
        reply: Sender<usize>,
    },
    /// Stop playback if needed and exit the thread.
    Shutdown,
}

impl std::fmt::Debug for EngineCmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dispatch { action, .. } => f.debug_struct("Dispatch").field("action", action).finish(),
            Self::AddListener { .. } => f.write_str("AddListener"),
            Self::SetSink { .. } => f.write_str("SetSink"),
            Self::Snapshot { .. } => f.write_str("Snapshot"),
            Self::ListenerCount { .. } => f.write_str("ListenerCount"),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}
