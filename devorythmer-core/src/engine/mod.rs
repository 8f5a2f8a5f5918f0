//! Threaded driver for a [`crate::DrumMachine`].
//!
//! [`EngineHandle`] is the main-thread side: it owns the command channel and
//! the join handle. The engine thread owns the machine and the tick source,
//! so commands and ticks are applied strictly one after another.

pub mod commands;
mod engine_thread;
mod handle;

pub use commands::EngineCmd;
pub use handle::EngineHandle;
