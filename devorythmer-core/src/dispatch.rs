//! Apply inbound [`Action`]s to a [`DrumMachine`].

use devorythmer_types::{Action, DispatchResult, TransportChange};

use crate::machine::DrumMachine;

/// Single entry point for user intents. The returned transport change tells
/// the driver whether to arm or cancel its tick source.
pub fn dispatch_action(action: &Action, machine: &mut DrumMachine) -> DispatchResult {
    match action {
        Action::ToggleStep { track, step } => {
            DispatchResult::with_value(machine.toggle_step(track, *step))
        }
        Action::ToggleTrack(track) => DispatchResult::with_value(machine.toggle_track(track)),
        Action::LoadPreset(name) => DispatchResult::with_value(machine.load_preset(name)),
        Action::Play => start(machine),
        Action::Stop => halt(machine),
        Action::PlayStop => {
            if machine.is_playing() {
                halt(machine)
            } else {
                start(machine)
            }
        }
    }
}

fn start(machine: &mut DrumMachine) -> DispatchResult {
    if machine.play() {
        DispatchResult::with_transport(TransportChange::Started)
    } else {
        DispatchResult::none()
    }
}

fn halt(machine: &mut DrumMachine) -> DispatchResult {
    if machine.stop() {
        DispatchResult::with_transport(TransportChange::Stopped)
    } else {
        DispatchResult::none()
    }
}
