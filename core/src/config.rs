//! Application configuration
//!
//! Stored as TOML by confy (`~/.config/limber/config.toml` or platform
//! equivalent). The activity list itself is built in and not configurable.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::default_speech_command;
use crate::error::ConfigError;

const APP_NAME: &str = "limber";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimberConfig {
    /// Seconds (ticks) allotted to each activity
    #[serde(default = "default_ticks_per_activity")]
    pub ticks_per_activity: u32,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Cosmetic redraw cadence, independent of ticking
    #[serde(default = "default_render_interval_ms")]
    pub render_interval_ms: u64,
    #[serde(default)]
    pub start_muted: bool,
    #[serde(default = "default_speech_enabled")]
    pub speech_enabled: bool,
    /// Shell-style command line; the cue text is appended as last argument
    #[serde(default = "default_speech_command")]
    pub speech_command: String,
}

fn default_ticks_per_activity() -> u32 {
    33
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_render_interval_ms() -> u64 {
    150
}

fn default_speech_enabled() -> bool {
    true
}

impl Default for LimberConfig {
    fn default() -> Self {
        Self {
            ticks_per_activity: default_ticks_per_activity(),
            tick_interval_ms: default_tick_interval_ms(),
            render_interval_ms: default_render_interval_ms(),
            start_muted: false,
            speech_enabled: default_speech_enabled(),
            speech_command: default_speech_command(),
        }
    }
}

impl LimberConfig {
    /// Load the stored config, falling back to defaults if it is unreadable
    /// or invalid
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Using default configuration");
                Self::default()
            }
        }
    }

    pub fn try_load() -> Result<Self, ConfigError> {
        let config: Self = confy::load(APP_NAME, CONFIG_NAME)?;
        config.validate()?;
        Ok(config)
    }

    pub fn path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).ok()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_activity == 0 {
            return Err(invalid("ticks_per_activity must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms must be at least 1"));
        }
        if self.render_interval_ms == 0 {
            return Err(invalid("render_interval_ms must be at least 1"));
        }
        if self.speech_enabled && self.speech_command.trim().is_empty() {
            return Err(invalid("speech_command is empty"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = LimberConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ticks_per_activity, 33);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn zero_durations_are_rejected() {
        let config = LimberConfig {
            ticks_per_activity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        let config = LimberConfig {
            render_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_speech_command_only_matters_when_enabled() {
        let mut config = LimberConfig {
            speech_command: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        config.speech_enabled = false;
        assert!(config.validate().is_ok());
    }
}
