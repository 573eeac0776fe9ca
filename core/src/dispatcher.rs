//! Dispatcher - the single owner and writer of the session state
//!
//! Architecture:
//! - Dispatcher: background task that applies commands one at a time
//! - SessionHandle: cloneable read side, a watch channel of snapshots
//! - Cues produced by transitions go to the effect runner, tagged with the
//!   mute flag as it stood when they were emitted

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};

use crate::protocol::{Command, Cue};
use crate::session::{SessionSnapshot, SessionState};

/// Buffer size for the shared command channel
const COMMAND_BUFFER: usize = 32;

/// Create the command channel shared by the ticker and the input source
pub fn create_command_channel() -> (mpsc::Sender<Command>, mpsc::Receiver<Command>) {
    mpsc::channel(COMMAND_BUFFER)
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Handle
// ─────────────────────────────────────────────────────────────────────────────

/// Read access to the latest published snapshot
#[derive(Debug, Clone)]
pub struct SessionHandle {
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Copy of the latest snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Wait for the next published snapshot. Returns false once the
    /// dispatcher has shut down.
    pub async fn changed(&mut self) -> bool {
        self.snapshot_rx.changed().await.is_ok()
    }

    /// Whether the dispatcher is still running
    pub fn is_live(&self) -> bool {
        self.snapshot_rx.has_changed().is_ok()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────────────────────────────────────

pub struct Dispatcher {
    state: SessionState,
    cmd_rx: mpsc::Receiver<Command>,
    cue_tx: mpsc::Sender<Cue>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl Dispatcher {
    /// Create a dispatcher and the handle used to observe it
    pub fn new(
        state: SessionState,
        cmd_rx: mpsc::Receiver<Command>,
        cue_tx: mpsc::Sender<Cue>,
    ) -> (Self, SessionHandle) {
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
        let dispatcher = Self {
            state,
            cmd_rx,
            cue_tx,
            snapshot_tx,
        };
        (dispatcher, SessionHandle { snapshot_rx })
    }

    /// Run until the command channel closes, then return the final state
    ///
    /// Dropping `self` on return closes the cue channel and the snapshot
    /// channel, which stops the effect runner and the renderer.
    pub async fn run(mut self) -> SessionSnapshot {
        tracing::info!(
            activities = self.state.activities().len(),
            ticks_per_activity = self.state.ticks_per_activity(),
            "Session dispatcher started"
        );

        while let Some(command) = self.cmd_rx.recv().await {
            self.dispatch(command);
        }

        let last = self.state.snapshot();
        tracing::info!(
            index = last.current_index,
            elapsed = last.elapsed_ticks,
            completed = last.completed,
            "Session dispatcher stopped"
        );
        last
    }

    /// Apply one command. Never waits: a full cue queue drops the cue.
    fn dispatch(&mut self, command: Command) {
        let before = self.state.snapshot();
        let effects = self.state.apply(command);
        let after = self.state.snapshot();

        if after != before {
            tracing::debug!(
                ?command,
                index = after.current_index,
                elapsed = after.elapsed_ticks,
                paused = after.is_paused,
                muted = after.is_muted,
                "Session transition"
            );
            if after.completed && !before.completed {
                tracing::info!("Session complete");
            }
            self.snapshot_tx.send_replace(after);
        }

        let muted = self.state.is_muted();
        for request in effects {
            match self.cue_tx.try_send(Cue::new(request, muted)) {
                Ok(()) => {}
                Err(TrySendError::Full(cue)) => {
                    tracing::warn!(request = ?cue.request, "Cue queue full, dropping cue");
                }
                Err(TrySendError::Closed(cue)) => {
                    tracing::warn!(request = ?cue.request, "Effect runner gone, dropping cue");
                }
            }
        }
    }
}
