//! Transient "copied" acknowledgement after sharing a code.

use pawmatch_core::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const COPIED_MESSAGE: &str = "¡Copiado!";
pub const FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Destination for a copied code (system clipboard, terminal, ...).
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

#[derive(Default)]
struct FeedbackState {
    message: Option<String>,
    /// Incremented per acknowledgement; a timer only clears its own message.
    generation: u64,
}

/// Shows a short acknowledgement after a copy and clears it after a delay.
///
/// The clearing timer is best effort: it runs on a detached task and is
/// never cancelled.
#[derive(Clone)]
pub struct CopyFeedback {
    state: Arc<Mutex<FeedbackState>>,
    duration: Duration,
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(FEEDBACK_DURATION)
    }
}

impl CopyFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedbackState::default())),
            duration,
        }
    }

    /// Writes `text` to `sink` and shows the acknowledgement.
    ///
    /// Nothing is acknowledged if the write fails.
    pub async fn copy(&self, sink: &dyn ClipboardSink, text: &str) -> Result<()> {
        sink.write_text(text)?;
        self.acknowledge().await;
        Ok(())
    }

    /// Shows the acknowledgement and schedules it to disappear.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn acknowledge(&self) {
        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.message = Some(COPIED_MESSAGE.to_string());
            state.generation
        };

        let state = Arc::clone(&self.state);
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut state = state.lock().await;
            if state.generation == generation {
                state.message = None;
            }
        });
    }

    /// The acknowledgement currently shown, if any.
    pub async fn current(&self) -> Option<String> {
        self.state.lock().await.message.clone()
    }
}
