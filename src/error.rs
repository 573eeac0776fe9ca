//! Errors surfaced to the operator

use thiserror::Error;

use limber_core::SessionError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialize terminal")]
    TerminalSetup(#[source] std::io::Error),

    #[error("failed to draw to terminal")]
    Draw(#[source] std::io::Error),

    #[error("invalid session")]
    Session(#[from] SessionError),

    #[error("session task failed")]
    Task(#[from] tokio::task::JoinError),
}
