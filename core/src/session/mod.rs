//! Session state and its transition function
//!
//! `SessionState` is owned by the dispatcher and mutated only through
//! [`SessionState::apply`]. The transition is pure: no clock, no channels,
//! no audio. Side effects come back as a list of [`EffectRequest`]s.
//!
//! # Terminal state
//!
//! The session is done when the last activity's full duration has elapsed:
//! `current_index == len - 1 && elapsed_ticks >= ticks_per_activity`.
//! Pressing advance on the last activity fills its remaining time.

mod snapshot;


pub use snapshot::SessionSnapshot;

use std::sync::Arc;

use crate::error::SessionError;
use crate::protocol::{Command, EffectRequest};

/// Countdown cues are spoken when this many ticks or fewer remain
pub const COUNTDOWN_FROM: u32 = 3;

#[derive(Debug, Clone)]
pub struct SessionState {
    activities: Arc<[String]>,
    current_index: usize,
    elapsed_ticks: u32,
    ticks_per_activity: u32,
    is_paused: bool,
    is_muted: bool,
    started: bool,
    /// The current activity's name was already spoken before the first tick
    announced_before_start: bool,
    completed: bool,
}

impl SessionState {
    /// Create a paused session at the first activity
    pub fn new(activities: Vec<String>, ticks_per_activity: u32) -> Result<Self, SessionError> {
        if activities.is_empty() {
            return Err(SessionError::NoActivities);
        }
        if ticks_per_activity == 0 {
            return Err(SessionError::ZeroDuration);
        }
        Ok(Self {
            activities: activities.into(),
            current_index: 0,
            elapsed_ticks: 0,
            ticks_per_activity,
            is_paused: true,
            is_muted: false,
            started: false,
            announced_before_start: false,
            completed: false,
        })
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.is_muted = muted;
        self
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn ticks_per_activity(&self) -> u32 {
        self.ticks_per_activity
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    fn last_index(&self) -> usize {
        self.activities.len().saturating_sub(1)
    }

    /// No further activity transitions possible
    pub fn is_terminal(&self) -> bool {
        self.current_index >= self.last_index() && self.elapsed_ticks >= self.ticks_per_activity
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            activities: Arc::clone(&self.activities),
            current_index: self.current_index,
            elapsed_ticks: self.elapsed_ticks,
            ticks_per_activity: self.ticks_per_activity,
            is_paused: self.is_paused,
            is_muted: self.is_muted,
            started: self.started,
            completed: self.completed,
        }
    }

    /// Apply one command and return the cues it produced
    pub fn apply(&mut self, command: Command) -> Vec<EffectRequest> {
        let mut effects = Vec::new();
        match command {
            Command::TimeStep => self.time_step(&mut effects),
            Command::Advance => self.advance(&mut effects),
            Command::Retreat => self.retreat(&mut effects),
            Command::TogglePause => self.is_paused = !self.is_paused,
            Command::ToggleMute => self.is_muted = !self.is_muted,
        }
        effects
    }

    fn time_step(&mut self, effects: &mut Vec<EffectRequest>) {
        if self.is_paused || self.is_terminal() {
            return;
        }
        if self.current_index > self.last_index() {
            self.current_index = self.last_index();
            return;
        }

        if !self.started {
            self.started = true;
            effects.push(EffectRequest::AnnounceSessionStart);
            if !self.announced_before_start {
                effects.push(self.announce_current());
            }
        }

        self.elapsed_ticks = (self.elapsed_ticks + 1).min(self.ticks_per_activity);
        let remaining = self.ticks_per_activity - self.elapsed_ticks;

        if (1..=COUNTDOWN_FROM).contains(&remaining) {
            effects.push(EffectRequest::AnnounceCountdown(remaining));
        } else if remaining > COUNTDOWN_FROM && self.elapsed_ticks == self.ticks_per_activity / 2 {
            effects.push(EffectRequest::AnnounceHalfway);
        }

        if self.elapsed_ticks >= self.ticks_per_activity {
            self.advance(effects);
        }
    }

    fn advance(&mut self, effects: &mut Vec<EffectRequest>) {
        if self.current_index < self.last_index() {
            self.current_index += 1;
            self.elapsed_ticks = 0;
            self.push_navigation_cue(effects);
            return;
        }

        self.current_index = self.last_index();
        self.elapsed_ticks = self.ticks_per_activity;
        if !self.completed {
            self.completed = true;
            effects.push(EffectRequest::AnnounceComplete);
        }
    }

    fn retreat(&mut self, effects: &mut Vec<EffectRequest>) {
        if self.current_index == 0 {
            return;
        }
        self.current_index = self.current_index.min(self.activities.len()) - 1;
        self.elapsed_ticks = 0;
        self.completed = false;
        self.push_navigation_cue(effects);
    }

    fn push_navigation_cue(&mut self, effects: &mut Vec<EffectRequest>) {
        if !self.started {
            self.announced_before_start = true;
        }
        effects.push(self.announce_current());
    }

    fn announce_current(&self) -> EffectRequest {
        let name = self
            .activities
            .get(self.current_index)
            .cloned()
            .unwrap_or_default();
        EffectRequest::AnnounceActivity(name)
    }
}
