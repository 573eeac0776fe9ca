//! Read-only view of the session handed to the renderer

use std::sync::Arc;

/// A consistent copy of the session published after each transition
///
/// Cloning is cheap: the activity list is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub activities: Arc<[String]>,
    pub current_index: usize,
    pub elapsed_ticks: u32,
    pub ticks_per_activity: u32,
    pub is_paused: bool,
    pub is_muted: bool,
    /// First unpaused tick has happened
    pub started: bool,
    /// Terminal state reached and announced
    pub completed: bool,
}

impl SessionSnapshot {
    /// Name of the current activity
    pub fn current_activity(&self) -> Option<&str> {
        self.activities.get(self.current_index).map(String::as_str)
    }

    /// Ticks left in the current activity
    pub fn remaining_ticks(&self) -> u32 {
        self.ticks_per_activity.saturating_sub(self.elapsed_ticks)
    }

    /// Last activity with its full duration elapsed
    pub fn is_complete(&self) -> bool {
        !self.activities.is_empty()
            && self.current_index + 1 >= self.activities.len()
            && self.elapsed_ticks >= self.ticks_per_activity
    }

    /// Fraction of the whole session done (0.0 ..= 1.0)
    pub fn progress(&self) -> f64 {
        let total = self.activities.len() as u64 * u64::from(self.ticks_per_activity);
        if total == 0 {
            return 0.0;
        }
        let done = self.current_index as u64 * u64::from(self.ticks_per_activity)
            + u64::from(self.elapsed_ticks);
        (done as f64 / total as f64).clamp(0.0, 1.0)
    }
}
