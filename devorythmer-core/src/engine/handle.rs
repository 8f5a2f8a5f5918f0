//! EngineHandle: main-thread interface to the engine thread.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use devorythmer_types::{Action, DispatchResult, MachineSnapshot, SequencerEvent};

use super::commands::EngineCmd;
use super::engine_thread::EngineThread;
use crate::error::EngineError;
use crate::machine::DrumMachine;
use crate::sequencer::{ChannelListener, SequencerListener, TriggerSink};

/// Process-wide context: construct once with [`EngineHandle::spawn`], tear
/// down with [`EngineHandle::shutdown`] (or by dropping it).
///
/// Every operation that returns a value waits for the engine thread to
/// apply it. In particular once [`EngineHandle::stop`] returns, the tick
/// source has been cancelled and no further step is played.
pub struct EngineHandle {
    cmd_tx: Sender<EngineCmd>,
    join_handle: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn spawn(machine: DrumMachine) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let join_handle = thread::Builder::new()
            .name("devorythmer-engine".into())
            .spawn(move || EngineThread::new(machine, cmd_rx).run())?;

        Ok(Self {
            cmd_tx,
            join_handle: Some(join_handle),
        })
    }

    pub fn send_cmd(&self, cmd: EngineCmd) -> Result<(), EngineError> {
        self.cmd_tx.send(cmd).map_err(|_| EngineError::Disconnected)
    }

    /// Fire-and-forget: send a command and log if the engine thread is gone.
    fn send(&self, cmd: EngineCmd) {
        if let Err(e) = self.send_cmd(cmd) {
            log::warn!(target: "engine", "command dropped: {}", e);
        }
    }

    fn request<T>(&self, build: impl FnOnce(Sender<T>) -> EngineCmd) -> Result<T, EngineError> {
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        self.send_cmd(build(reply_tx))?;
        reply_rx.recv().map_err(|_| EngineError::Disconnected)
    }

    /// Apply an action and wait for its result.
    pub fn dispatch(&self, action: Action) -> Result<DispatchResult, EngineError> {
        self.request(|reply| EngineCmd::Dispatch {
            action,
            reply: Some(reply),
        })
    }

    /// Apply an action without waiting. Later requests still see its effect,
    /// since the engine thread handles commands in order.
    pub fn dispatch_async(&self, action: Action) {
        self.send(EngineCmd::Dispatch {
            action,
            reply: None,
        });
    }

    pub fn toggle_step(&self, track: &str, step: usize) -> Result<bool, EngineError> {
        Ok(self.dispatch(Action::toggle_step(track, step))?.value)
    }

    pub fn toggle_track(&self, track: &str) -> Result<bool, EngineError> {
        Ok(self.dispatch(Action::ToggleTrack(track.to_string()))?.value)
    }

    pub fn load_preset(&self, name: &str) -> Result<bool, EngineError> {
        Ok(self.dispatch(Action::LoadPreset(name.to_string()))?.value)
    }

    /// Returns whether playback started (false if already playing).
    pub fn play(&self) -> Result<bool, EngineError> {
        Ok(self.dispatch(Action::Play)?.value)
    }

    /// Returns whether playback stopped (false if already stopped).
    pub fn stop(&self) -> Result<bool, EngineError> {
        Ok(self.dispatch(Action::Stop)?.value)
    }

    pub fn add_listener(&self, listener: Box<dyn SequencerListener>) {
        self.send(EngineCmd::AddListener { listener });
    }

    /// Receive every event emitted from now on. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> Receiver<SequencerEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.add_listener(Box::new(ChannelListener::new(tx)));
        rx
    }

    pub fn set_sink(&self, sink: Box<dyn TriggerSink>) {
        self.send(EngineCmd::SetSink { sink });
    }

    pub fn snapshot(&self) -> Result<MachineSnapshot, EngineError> {
        self.request(|reply| EngineCmd::Snapshot { reply })
    }

    pub fn listener_count(&self) -> Result<usize, EngineError> {
        self.request(|reply| EngineCmd::ListenerCount { reply })
    }

    /// Stop playback, end the engine thread and wait for it.
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        if let Some(handle) = self.join_handle.take() {
            let _ = self.send_cmd(EngineCmd::Shutdown);
            if handle.join().is_err() {
                log::error!(target: "engine", "engine thread panicked");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}
