//! # devorythmer-types
//!
//! Shared type definitions for the DevoRythmer drum machine.
//! Pure data: step patterns, the preset catalog, the Euclidean generator,
//! inbound actions and outbound sequencer events. No I/O, no threads.

pub mod action;
pub mod event;
pub mod state;

pub use action::*;
pub use event::SequencerEvent;

// Re-export all state types at crate root for convenience
pub use state::*;
