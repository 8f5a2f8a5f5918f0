//! Line commands read from stdin.

use devorythmer_types::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(Action),
    Presets,
    Show,
    Dump,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  play | stop | space        transport (space toggles)
  toggle <track> <step>      flip one step (steps count from 0)
  mute <track>               flip a track on/off
  preset <name>              load a preset (unknown names load silence)
  presets                    list presets
  show                       print the grid
  dump                       print the machine state as JSON
  help | quit";

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (head.to_lowercase().as_str(), args.as_slice()) {
        ("play", []) => Command::Action(Action::Play),
        ("stop", []) => Command::Action(Action::Stop),
        ("space" | "p", []) => Command::Action(Action::PlayStop),
        ("toggle" | "t", [track, step]) => {
            let step = step
                .parse::<usize>()
                .map_err(|_| format!("'{}' is not a step number", step))?;
            Command::Action(Action::toggle_step(*track, step))
        }
        ("mute" | "m", [track]) => Command::Action(Action::ToggleTrack(track.to_string())),
        ("preset", [name]) => Command::Action(Action::LoadPreset(name.to_string())),
        ("presets", []) => Command::Presets,
        ("show", []) => Command::Show,
        ("dump", []) => Command::Dump,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit" | "q", []) => Command::Quit,
        (other, _) => return Err(format!("unknown command '{}' (try help)", other)),
    };
    Ok(Some(command))
}
