pub mod audio;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod routine;
pub mod session;
pub mod ticker;

// Re-exports for convenience
pub use audio::{CommandSpeaker, CueSender, EffectRunner, SilentSpeaker, Speaker, create_cue_channel};
pub use config::LimberConfig;
pub use dispatcher::{Dispatcher, SessionHandle, create_command_channel};
pub use error::{AudioError, ConfigError, SessionError};
pub use protocol::{Command, Cue, EffectRequest};
pub use session::{COUNTDOWN_FROM, SessionSnapshot, SessionState};
pub use ticker::{TickClock, Ticker};

#[cfg(test)]
mod pipeline_tests;
