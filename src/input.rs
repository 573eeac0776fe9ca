//! Input source - translates key presses into session commands
//!
//! Runs on a dedicated thread because crossterm's event read blocks.
//! Resize events bypass the dispatcher and go straight to the renderer.
//! The thread owns the only strong command sender, so returning from it
//! (exit key, read failure) closes the command channel and ends the session.

use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use phf::phf_map;
use tokio::sync::mpsc;

use limber_core::Command;

/// How often the read loop checks whether the session is still alive
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What a key press means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Exit,
}

/// Hints forwarded directly to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    Resize { width: u16, height: u16 },
}

static KEY_BINDINGS: phf::Map<char, KeyAction> = phf_map! {
    'f' => KeyAction::Command(Command::Advance),
    'n' => KeyAction::Command(Command::Advance),
    'b' => KeyAction::Command(Command::Retreat),
    'p' => KeyAction::Command(Command::TogglePause),
    ' ' => KeyAction::Command(Command::TogglePause),
    'm' => KeyAction::Command(Command::ToggleMute),
    'q' => KeyAction::Exit,
};

/// Map a key event to an action. Unknown keys map to `None`.
pub fn action_for(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Exit)
        }
        KeyCode::Char(c) => KEY_BINDINGS.get(&c.to_ascii_lowercase()).copied(),
        KeyCode::Right => Some(KeyAction::Command(Command::Advance)),
        KeyCode::Left => Some(KeyAction::Command(Command::Retreat)),
        KeyCode::Esc => Some(KeyAction::Exit),
        _ => None,
    }
}

pub struct InputSource {
    cmd_tx: mpsc::Sender<Command>,
    hint_tx: mpsc::UnboundedSender<RenderHint>,
}

impl InputSource {
    pub fn new(cmd_tx: mpsc::Sender<Command>, hint_tx: mpsc::UnboundedSender<RenderHint>) -> Self {
        Self { cmd_tx, hint_tx }
    }

    /// Start reading keys on a background thread
    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        std::thread::Builder::new()
            .name("limber-input".to_string())
            .spawn(move || self.run())
    }

    fn run(self) {
        loop {
            if self.cmd_tx.is_closed() {
                break;
            }
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(err) => {
                    tracing::error!(error = %err, "Failed to poll terminal events");
                    break;
                }
            }
            let event = match event::read() {
                Ok(event) => event,
                Err(err) => {
                    tracing::error!(error = %err, "Failed to read terminal event");
                    break;
                }
            };
            if !self.handle_event(event) {
                break;
            }
        }
        tracing::info!("Input source stopped");
    }

    /// Returns false when input should stop
    fn handle_event(&self, event: Event) -> bool {
        match event {
            Event::Key(key) => match action_for(&key) {
                Some(KeyAction::Command(command)) => self.cmd_tx.blocking_send(command).is_ok(),
                Some(KeyAction::Exit) => {
                    tracing::info!("Exit requested");
                    false
                }
                None => true,
            },
            Event::Resize(width, height) => {
                let _ = self.hint_tx.send(RenderHint::Resize { width, height });
                true
            }
            _ => true,
        }
    }
}
