//! Error types for the session core

use thiserror::Error;

/// Errors while constructing a session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session needs at least one activity")]
    NoActivities,

    #[error("ticks per activity must be at least 1")]
    ZeroDuration,
}

/// Errors from the speech collaborator
///
/// These never leave the effect runner; they are logged and dropped.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("speech command is empty or has invalid quoting: {command:?}")]
    InvalidCommand { command: String },

    #[error("failed to launch speech command {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("speech command {program} exited with {status}")]
    Failed { program: String, status: std::process::ExitStatus },

    #[error("speech task panicked or was cancelled")]
    Join(#[source] tokio::task::JoinError),
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}
