//! End-to-end tests for ticker → dispatcher → effect runner
//!
//! Uses tokio's paused clock so ticks are deterministic.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::audio::{EffectRunner, Speaker, create_cue_channel};
use crate::dispatcher::{Dispatcher, create_command_channel};
use crate::error::AudioError;
use crate::protocol::Command;
use crate::session::SessionState;
use crate::ticker::Ticker;

#[derive(Default)]
struct RecordingSpeaker {
    lines: Mutex<Vec<String>>,
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) -> Result<(), AudioError> {
        self.lines.lock().expect("lock").push(text.to_string());
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn full_session_runs_to_completion_and_shuts_down() {
    let state = SessionState::new(vec!["A".to_string(), "B".to_string()], 3)
        .expect("valid session");
    let speaker = Arc::new(RecordingSpeaker::default());

    let (cmd_tx, cmd_rx) = create_command_channel();
    let (cue_tx, cue_rx) = create_cue_channel();
    let (dispatcher, session) = Dispatcher::new(state, cmd_rx, cue_tx);

    let runner = tokio::spawn(EffectRunner::new(cue_rx, speaker.clone()).run());
    let dispatch = tokio::spawn(dispatcher.run());
    let ticker = tokio::spawn(Ticker::new(&cmd_tx, Duration::from_secs(1)).run());

    cmd_tx.send(Command::TogglePause).await.expect("dispatcher alive");
    tokio::time::sleep(Duration::from_millis(6500)).await;
    assert!(session.snapshot().is_complete());

    // A few more ticks in the terminal state change nothing
    tokio::time::sleep(Duration::from_secs(3)).await;
    drop(cmd_tx);

    let last = dispatch.await.expect("dispatcher task");
    assert!(last.completed);
    assert_eq!(last.current_index, 1);

    runner.await.expect("runner task");
    ticker.await.expect("ticker task");

    let lines = speaker.lines.lock().expect("lock").clone();
    assert_eq!(
        lines,
        vec!["Starting", "A", "2", "1", "B", "2", "1", "All done"]
    );
}

#[tokio::test(start_paused = true)]
async fn muted_session_still_progresses_silently() {
    let state = SessionState::new(vec!["A".to_string(), "B".to_string()], 2)
        .expect("valid session")
        .with_muted(true);
    let speaker = Arc::new(RecordingSpeaker::default());

    let (cmd_tx, cmd_rx) = create_command_channel();
    let (cue_tx, cue_rx) = create_cue_channel();
    let (dispatcher, _session) = Dispatcher::new(state, cmd_rx, cue_tx);

    let runner = tokio::spawn(EffectRunner::new(cue_rx, speaker.clone()).run());
    let dispatch = tokio::spawn(dispatcher.run());
    tokio::spawn(Ticker::new(&cmd_tx, Duration::from_secs(1)).run());

    cmd_tx.send(Command::TogglePause).await.expect("dispatcher alive");
    tokio::time::sleep(Duration::from_millis(4500)).await;
    drop(cmd_tx);

    let last = dispatch.await.expect("dispatcher task");
    assert!(last.is_complete());
    assert_eq!(runner.await.expect("runner task"), 0);
    assert!(speaker.lines.lock().expect("lock").is_empty());
}
