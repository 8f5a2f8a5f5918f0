//! Terminal rendering of sequencer events and machine snapshots.

use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;

use devorythmer_types::{MachineSnapshot, Preset, SequencerEvent};

/// One line per played step: a playhead row and the tracks that sounded.
pub fn format_step(step: usize, step_count: usize, active_tracks: &[String]) -> String {
    let playhead: String = (0..step_count)
        .map(|i| if i == step { '|' } else { '-' })
        .collect();
    format!("{:>3} {} {}", step, playhead, active_tracks.join(" "))
        .trim_end()
        .to_string()
}

pub fn format_event(event: &SequencerEvent, step_count: usize) -> Option<String> {
    match event {
        SequencerEvent::Play => Some("> play".to_string()),
        SequencerEvent::Stop => Some("# stop".to_string()),
        // A visual front end clears its highlights here; a terminal has none.
        SequencerEvent::StepStart { .. } => None,
        SequencerEvent::StepPlay { step, active_tracks } => {
            Some(format_step(*step, step_count, active_tracks))
        }
    }
}

pub fn render_grid(snapshot: &MachineSnapshot) -> String {
    let width = snapshot
        .patterns
        .iter()
        .map(|p| p.track.len())
        .max()
        .unwrap_or(0);
    let mut out = format!(
        "preset {}  bpm {}  {}\n",
        snapshot.preset.as_deref().unwrap_or("-"),
        snapshot.bpm,
        if snapshot.playing { "playing" } else { "stopped" }
    );
    for (pattern, state) in snapshot.patterns.iter().zip(&snapshot.track_states) {
        let cells: String = pattern
            .steps
            .iter()
            .map(|&hit| if hit { 'x' } else { '.' })
            .collect();
        out.push_str(&format!(
            "{:<width$} {} {}\n",
            pattern.track,
            cells,
            if state.enabled { "on" } else { "off" },
            width = width
        ));
    }
    out
}

pub fn render_presets(presets: &[Preset]) -> String {
    presets
        .iter()
        .map(|p| {
            let kind = if p.is_euclidean() { "euclidean" } else { "grid" };
            format!("{:<8} {:<10} {}", p.name, kind, p.description)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print events until the engine drops its end of the channel.
pub fn spawn_printer(events: Receiver<SequencerEvent>, step_count: usize) -> JoinHandle<()> {
    thread::spawn(move || {
        for event in events.iter() {
            if let Some(line) = format_event(&event, step_count) {
                println!("{}", line);
            }
        }
    })
}
