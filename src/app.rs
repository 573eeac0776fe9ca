//! Session wiring
//!
//! Spawns the ticker, dispatcher and effect runner as tokio tasks, the
//! input source on its own thread, and runs the renderer on the caller's
//! task. Shutdown flows one way: input exit closes the command channel,
//! the dispatcher drains and drops the cue and snapshot channels, and the
//! effect runner and renderer stop on their own.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use limber_core::{
    CommandSpeaker, Dispatcher, EffectRunner, LimberConfig, SessionSnapshot, SessionState,
    SilentSpeaker, Speaker, Ticker, create_command_channel, create_cue_channel, routine,
};

use crate::error::AppError;
use crate::input::InputSource;
use crate::render::{Renderer, Tui};

/// Upper bound on waiting for queued cues after the session ends
const EFFECT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

pub fn build_speaker(config: &LimberConfig) -> Arc<dyn Speaker> {
    if !config.speech_enabled {
        return Arc::new(SilentSpeaker);
    }
    match CommandSpeaker::from_command_line(&config.speech_command) {
        Ok(speaker) => {
            tracing::info!(program = speaker.program(), "Speech enabled");
            Arc::new(speaker)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Speech disabled");
            Arc::new(SilentSpeaker)
        }
    }
}

/// Run one session to completion and return where it stopped
pub async fn run(config: LimberConfig) -> Result<SessionSnapshot, AppError> {
    let state = SessionState::new(routine::default_activities(), config.ticks_per_activity)?
        .with_muted(config.start_muted);
    let speaker = build_speaker(&config);

    // Terminal first: if it fails nothing else has started
    let mut tui = Tui::init()?;

    let (cmd_tx, cmd_rx) = create_command_channel();
    let (cue_tx, cue_rx) = create_cue_channel();
    let (hint_tx, hint_rx) = mpsc::unbounded_channel();

    let (dispatcher, session) = Dispatcher::new(state, cmd_rx, cue_tx);
    let ticker = Ticker::new(&cmd_tx, config.tick_interval());

    let effects = tokio::spawn(EffectRunner::new(cue_rx, speaker).run());
    let dispatch = tokio::spawn(dispatcher.run());
    tokio::spawn(ticker.run());
    let input = InputSource::new(cmd_tx, hint_tx)
        .spawn()
        .map_err(AppError::TerminalSetup)?;

    Renderer::new(session, hint_rx, config.render_interval())
        .run(&mut tui.terminal)
        .await?;
    drop(tui);

    let last = dispatch.await?;
    match tokio::time::timeout(EFFECT_DRAIN_TIMEOUT, effects).await {
        Ok(result) => {
            result?;
        }
        Err(_) => tracing::warn!("Gave up waiting for queued cues"),
    }
    if input.join().is_err() {
        tracing::warn!("Input thread panicked");
    }

    Ok(last)
}
