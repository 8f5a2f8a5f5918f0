mod commands;
mod display;
mod sink;

use std::fs::File;
use std::io::{self, BufRead};
use std::path::PathBuf;

use commands::{parse_command, Command, HELP};
use devorythmer_core::config::Config;
use devorythmer_core::{DrumMachine, EngineConfig, EngineHandle};
use devorythmer_types::{Action, DispatchResult};
use sink::LogSink;

/// File logger under the config dir; `--verbose` selects Debug.
fn init_logging(verbose: bool) -> io::Result<PathBuf> {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("devorythmer");
    std::fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("devorythmer.log");
    let log_file = File::create(&log_path)?;

    WriteLogger::init(log_level, simplelog::Config::default(), log_file)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    log::info!("devorythmer starting (log level: {:?})", log_level);
    Ok(log_path)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn engine_config(args: &[String]) -> Result<EngineConfig, String> {
    let mut config = Config::load().engine_config().map_err(|e| e.to_string())?;

    if let Some(bpm) = flag_value(args, "--bpm") {
        config.bpm = bpm
            .parse()
            .map_err(|_| format!("--bpm expects a number, got '{}'", bpm))?;
    }
    if let Some(preset) = flag_value(args, "--preset") {
        config.default_preset = Some(preset.to_string());
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    match init_logging(verbose) {
        Ok(path) if verbose => eprintln!("devorythmer: logging to {}", path.display()),
        Ok(_) => {}
        Err(e) => eprintln!("devorythmer: logging disabled: {}", e),
    }

    let config = match engine_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("devorythmer: {}", e);
            std::process::exit(1);
        }
    };

    let machine = DrumMachine::with_sink(&config, Box::new(LogSink))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let engine = EngineHandle::spawn(machine)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let printer = display::spawn_printer(engine.subscribe(), config.step_count);

    println!(
        "devorythmer: {} tracks, {} steps, {} bpm. type help for commands",
        config.tracks.len(),
        config.step_count,
        config.bpm
    );
    let result = run(&engine, &config);

    // Shutting the engine down drops the subscriber, which ends the printer.
    engine.shutdown();
    let _ = printer.join();
    log::info!("devorythmer exiting");
    result
}

fn run(engine: &EngineHandle, config: &EngineConfig) -> io::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Presets => println!("{}", display::render_presets(&config.presets)),
            Command::Show => match engine.snapshot() {
                Ok(snapshot) => print!("{}", display::render_grid(&snapshot)),
                Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e)),
            },
            Command::Dump => match engine.snapshot() {
                Ok(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e)),
            },
            // Transport changes show up as play/stop lines from the printer.
            Command::Action(action) if action.is_transport() => engine.dispatch_async(action),
            Command::Action(action) => match engine.dispatch(action.clone()) {
                Ok(result) => report(&action, result),
                Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e)),
            },
        }
    }
    Ok(())
}

fn report(action: &Action, result: DispatchResult) {
    let on_off = |v: bool| if v { "on" } else { "off" };
    match action {
        Action::ToggleStep { track, step } => println!("{} step {}: {}", track, step, on_off(result.value)),
        Action::ToggleTrack(track) => println!("{} track: {}", track, on_off(result.value)),
        Action::LoadPreset(name) if result.value => println!("preset {} loaded", name),
        Action::LoadPreset(name) => println!("no preset named {}, pattern cleared", name),
        Action::Play | Action::Stop | Action::PlayStop => {}
    }
}
