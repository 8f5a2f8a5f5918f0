//! Inbound user intents and the result of applying them.

/// Everything a front end can ask the drum machine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ToggleStep { track: String, step: usize },
    ToggleTrack(String),
    LoadPreset(String),
    Play,
    Stop,
    /// Play if stopped, stop if playing.
    PlayStop,
}

impl Action {
    pub fn toggle_step(track: impl Into<String>, step: usize) -> Self {
        Self::ToggleStep {
            track: track.into(),
            step,
        }
    }

    /// Whether the action only touches the transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Play | Self::Stop | Self::PlayStop)
    }
}

/// Change to the transport caused by an action. The tick source is armed or
/// cancelled from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportChange {
    #[default]
    None,
    Started,
    Stopped,
}

/// Outcome of dispatching one [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// New step/track flag for toggles, whether the preset was known for
    /// `LoadPreset`, whether the transport changed for transport actions.
    pub value: bool,
    pub transport: TransportChange,
}

impl DispatchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_value(value: bool) -> Self {
        Self {
            value,
            transport: TransportChange::None,
        }
    }

    pub fn with_transport(transport: TransportChange) -> Self {
        Self {
            value: transport != TransportChange::None,
            transport,
        }
    }
}
