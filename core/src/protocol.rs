//! Messages exchanged between the session tasks
//!
//! ```text
//!  Ticker ──TimeStep──┐
//!                     ├──► Dispatcher ──Cue──► EffectRunner ──► Speaker
//!  InputSource ───────┘        │
//!                              └──SessionSnapshot──► Renderer
//! ```

/// User and timer intents, consumed only by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Skip to the next activity (or finish the last one)
    Advance,
    /// Go back to the previous activity
    Retreat,
    TogglePause,
    ToggleMute,
    /// One wall-clock interval elapsed
    TimeStep,
}

/// Audio cue intents produced as a by-product of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectRequest {
    /// Speak the name of the activity that just became current
    AnnounceActivity(String),
    /// Speak the seconds left in the current activity
    AnnounceCountdown(u32),
    AnnounceSessionStart,
    AnnounceHalfway,
    AnnounceComplete,
}

impl EffectRequest {
    /// Text handed to the speech collaborator
    pub fn phrase(&self) -> String {
        match self {
            EffectRequest::AnnounceActivity(name) => name.clone(),
            EffectRequest::AnnounceCountdown(seconds) => seconds.to_string(),
            EffectRequest::AnnounceSessionStart => "Starting".to_string(),
            EffectRequest::AnnounceHalfway => "Halfway".to_string(),
            EffectRequest::AnnounceComplete => "All done".to_string(),
        }
    }
}

/// An effect request tagged with the mute decision at emission time
///
/// The runner never re-reads the session's mute flag, so unmuting between
/// emission and playback cannot resurrect a cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub request: EffectRequest,
    pub muted: bool,
}

impl Cue {
    pub fn new(request: EffectRequest, muted: bool) -> Self {
        Self { request, muted }
    }
}
