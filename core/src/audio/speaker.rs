//! Speech collaborator
//!
//! TTS goes through an external utility: `say` on macOS, `espeak`
//! elsewhere. Calls block until the utility exits, so the effect runner
//! invokes them on the blocking pool.

use std::process::{Command, Stdio};

use crate::error::AudioError;

/// Something that can speak a line of text
pub trait Speaker: Send + Sync + 'static {
    fn speak(&self, text: &str) -> Result<(), AudioError>;
}

/// Platform default speech command line
pub fn default_speech_command() -> String {
    if cfg!(target_os = "macos") {
        "say".to_string()
    } else {
        "espeak".to_string()
    }
}

/// Speaks by running an external command with the text as its last argument
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    /// Parse a shell-style command line such as `espeak -s 150`
    pub fn from_command_line(command: &str) -> Result<Self, AudioError> {
        let mut parts = shlex::split(command)
            .filter(|parts| !parts.is_empty())
            .ok_or_else(|| AudioError::InvalidCommand {
                command: command.to_string(),
            })?;
        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) -> Result<(), AudioError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| AudioError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(AudioError::Failed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Speaker used when speech is disabled in config
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, _text: &str) -> Result<(), AudioError> {
        Ok(())
    }
}
