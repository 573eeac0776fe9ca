//! Effect runner - plays session cues in the order they were emitted
//!
//! Runs in a background task, receiving Cues via channel. Speech is
//! invoked on the blocking pool and awaited before the next cue, which
//! keeps cues FIFO without holding up the dispatcher.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::speaker::Speaker;
use crate::error::AudioError;
use crate::protocol::Cue;

/// Sender handle for session cues
pub type CueSender = mpsc::Sender<Cue>;

/// Create a new cue channel
pub fn create_cue_channel() -> (CueSender, mpsc::Receiver<Cue>) {
    // A whole activity's worth of cues fits many times over
    mpsc::channel(64)
}

pub struct EffectRunner {
    cue_rx: mpsc::Receiver<Cue>,
    speaker: Arc<dyn Speaker>,
}

impl EffectRunner {
    pub fn new(cue_rx: mpsc::Receiver<Cue>, speaker: Arc<dyn Speaker>) -> Self {
        Self { cue_rx, speaker }
    }

    /// Run until the dispatcher closes the cue channel
    ///
    /// Returns how many cues were actually spoken.
    pub async fn run(mut self) -> usize {
        let mut spoken = 0;
        while let Some(cue) = self.cue_rx.recv().await {
            if cue.muted {
                tracing::debug!(request = ?cue.request, "Cue muted");
                continue;
            }

            let text = cue.request.phrase();
            match self.speak(text.clone()).await {
                Ok(()) => {
                    spoken += 1;
                    tracing::debug!(%text, "Cue spoken");
                }
                Err(err) => {
                    tracing::warn!(error = %err, %text, "Failed to speak cue");
                }
            }
        }
        tracing::debug!(spoken, "Effect runner stopped");
        spoken
    }

    async fn speak(&self, text: String) -> Result<(), AudioError> {
        let speaker = Arc::clone(&self.speaker);
        tokio::task::spawn_blocking(move || speaker.speak(&text))
            .await
            .map_err(AudioError::Join)?
    }
}
