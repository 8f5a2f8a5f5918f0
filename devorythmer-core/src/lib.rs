//! # devorythmer-core
//!
//! Rhythm engine for the DevoRythmer drum machine: pattern storage, the
//! sequencer state machine and a threaded driver, independent of any UI or
//! audio backend.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use devorythmer_core::config::Config;
//! use devorythmer_core::{DrumMachine, EngineHandle};
//!
//! // 1. Resolve configuration (embedded defaults + user override file)
//! let config = Config::load().engine_config()?;
//!
//! // 2. Build the machine; the default preset is loaded here
//! let mut machine = DrumMachine::new(&config)?;
//! machine.set_sink(Box::new(|track: &str| println!("hit {track}")));
//!
//! // 3. Hand it to the engine thread and drive it
//! let engine = EngineHandle::spawn(machine)?;
//! let events = engine.subscribe();
//! engine.play()?;
//! let first = events.recv()?;
//! engine.stop()?;
//! engine.shutdown();
//! # let _ = first;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`state`]: `PatternStore`: per-track grids, mute flags, preset loading
//! - [`sequencer`]: `Sequencer` state machine, `SequencerListener` and
//!   `TriggerSink` collaborator traits
//! - [`machine`]: `DrumMachine`, the single owned context
//! - [`dispatch`]: `dispatch_action()`, the entry point for user intents
//! - [`engine`]: `EngineHandle` and the engine thread (tick source)
//! - [`config`]: TOML configuration loading
//! - [`error`]: error enums

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod machine;
pub mod sequencer;
pub mod state;

pub use config::{Config, EngineConfig};
pub use dispatch::dispatch_action;
pub use engine::EngineHandle;
pub use error::{ConfigError, EngineError, PatternError};
pub use machine::DrumMachine;
pub use sequencer::{ChannelListener, NullSink, Sequencer, SequencerListener, TriggerSink};
pub use state::PatternStore;

pub use devorythmer_types as types;
