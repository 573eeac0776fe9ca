//! Audio subsystem for session cues
//!
//! The dispatcher emits [`Cue`](crate::protocol::Cue)s; the effect runner
//! turns them into speech off the critical path, so slow or failing audio
//! never stalls ticking or input handling.

mod service;
mod speaker;

pub use service::{CueSender, EffectRunner, create_cue_channel};
pub use speaker::{CommandSpeaker, SilentSpeaker, Speaker, default_speech_command};
