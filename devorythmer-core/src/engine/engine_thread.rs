use crossbeam_channel::{Receiver, RecvError};

use devorythmer_types::{DispatchResult, TransportChange};

use super::commands::EngineCmd;
use crate::dispatch::dispatch_action;
use crate::machine::DrumMachine;

pub(crate) struct EngineThread {
    machine: DrumMachine,
    cmd_rx: Receiver<EngineCmd>,
    /// `tick(step_time)` while playing, `never()` while stopped. Replacing
    /// the receiver drops any tick already queued on the old one.
    ticker: Receiver<std::time::Instant>,
}

impl EngineThread {
    pub(crate) fn new(machine: DrumMachine, cmd_rx: Receiver<EngineCmd>) -> Self {
        Self {
            machine,
            cmd_rx,
            ticker: crossbeam_channel::never(),
        }
    }

    pub(crate) fn run(mut self) {
        log::debug!(target: "engine", "engine thread started");
        loop {
            crossbeam_channel::select! {
                recv(self.cmd_rx) -> result => {
                    if self.handle_recv(result) {
                        break;
                    }
                }
                recv(self.ticker) -> _ => {
                    self.machine.tick();
                }
            }
        }
        // Disconnected or shut down: make sure listeners see the stop.
        self.machine.stop();
        log::debug!(target: "engine", "engine thread exiting");
    }

    /// Returns true when the loop should exit.
    fn handle_recv(&mut self, result: Result<EngineCmd, RecvError>) -> bool {
        match result {
            Ok(cmd) => self.handle_cmd(cmd),
            Err(_) => true, // Disconnected
        }
    }

    fn handle_cmd(&mut self, cmd: EngineCmd) -> bool {
        match cmd {
            EngineCmd::Dispatch { action, reply } => {
                let result = dispatch_action(&action, &mut self.machine);
                self.apply_transport(result);
                if let Some(reply) = reply {
                    let _ = reply.send(result);
                }
            }
            EngineCmd::AddListener { listener } => self.machine.add_listener(listener),
            EngineCmd::SetSink { sink } => self.machine.set_sink(sink),
            EngineCmd::Snapshot { reply } => {
                let _ = reply.send(self.machine.snapshot());
            }
            EngineCmd::ListenerCount { reply } => {
                let _ = reply.send(self.machine.listener_count());
            }
            EngineCmd::Shutdown => return true,
        }
        false
    }

    fn apply_transport(&mut self, result: DispatchResult) {
        match result.transport {
            TransportChange::Started => {
                self.ticker = crossbeam_channel::tick(self.machine.step_time());
            }
            TransportChange::Stopped => {
                self.ticker = crossbeam_channel::never();
            }
            TransportChange::None => {}
        }
    }
}
