//! Session use case implementation.
//!
//! `SessionUseCase` is the single writer of the session state. Every event
//! takes the write lock, computes the next state with `AppState::apply` and
//! swaps it in, so two transitions never interleave.

use pawmatch_core::gateway::{NameGateway, assign_ids_now};
use pawmatch_core::{
    AppMode, AppState, NameCandidate, PawError, Result, SessionEvent, Species, SwipeDirection,
};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// An owned copy of a match, detached from the state lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub candidate: NameCandidate,
    pub votes: usize,
}

/// Use case driving one PawMatch session.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct SessionUseCase {
    state: Arc<RwLock<AppState>>,
    gateway: Arc<dyn NameGateway>,
    /// Bumped on every reset so a generation that finishes afterwards is dropped.
    reset_epoch: Arc<AtomicU64>,
}

impl SessionUseCase {
    pub fn new(gateway: Arc<dyn NameGateway>) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::new())),
            gateway,
            reset_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn mode(&self) -> AppMode {
        self.state.read().await.mode
    }

    /// Applies `event` and replaces the state with the result.
    ///
    /// On error the state is left as it was.
    pub async fn dispatch(&self, event: SessionEvent) -> Result<AppState> {
        let is_reset = matches!(event, SessionEvent::Reset);
        let mut state = self.state.write().await;

        let next = state.apply(event).inspect_err(|err| {
            tracing::warn!(mode = %state.mode, "event rejected: {}", err);
        })?;

        if is_reset {
            self.reset_epoch.fetch_add(1, Ordering::SeqCst);
        }
        *state = next.clone();
        Ok(next)
    }

    pub async fn choose_host(&self) -> Result<AppState> {
        self.dispatch(SessionEvent::HostSelected).await
    }

    pub async fn choose_join(&self) -> Result<AppState> {
        self.dispatch(SessionEvent::JoinSelected).await
    }

    pub async fn back(&self) -> Result<AppState> {
        self.dispatch(SessionEvent::Back).await
    }

    /// Generates names for `species` and moves to the share-session screen.
    ///
    /// The session shows the loading screen while the gateway call is in
    /// flight. On failure the session returns to landing and the error is
    /// reported as `GenerationFailure`. If the session was reset meanwhile,
    /// the outcome is discarded and the current state is returned.
    pub async fn generate(&self, species: Species) -> Result<AppState> {
        let epoch = self.reset_epoch.load(Ordering::SeqCst);
        self.dispatch(SessionEvent::GenerationStarted { species })
            .await?;

        let outcome = self.gateway.generate(species).await;

        match outcome {
            Ok(names) => {
                let names = assign_ids_now(names);
                self.settle_generation(epoch, SessionEvent::GenerationSucceeded { names })
                    .await
            }
            Err(err) => {
                tracing::warn!(%species, "name generation failed: {}", err);
                let message = match err {
                    PawError::GenerationFailure(message) => message,
                    other => other.to_string(),
                };
                self.settle_generation(
                    epoch,
                    SessionEvent::GenerationFailed {
                        message: message.clone(),
                    },
                )
                .await?;
                Err(PawError::GenerationFailure(message))
            }
        }
    }

    /// Applies a generation outcome unless the session was reset since `epoch`.
    async fn settle_generation(&self, epoch: u64, event: SessionEvent) -> Result<AppState> {
        let mut state = self.state.write().await;
        if self.reset_epoch.load(Ordering::SeqCst) != epoch {
            tracing::info!("session was reset during generation, discarding result");
            return Ok(state.clone());
        }
        let next = state.apply(event)?;
        *state = next.clone();
        Ok(next)
    }

    pub async fn start_swiping(&self) -> Result<AppState> {
        self.dispatch(SessionEvent::StartSwiping).await
    }

    pub async fn submit_session_token(&self, token: impl Into<String>) -> Result<AppState> {
        self.dispatch(SessionEvent::SubmitSessionToken {
            token: token.into(),
        })
        .await
    }

    pub async fn swipe(&self, direction: SwipeDirection) -> Result<AppState> {
        self.dispatch(SessionEvent::Swiped { direction }).await
    }

    pub async fn skip_remaining(&self) -> Result<AppState> {
        self.dispatch(SessionEvent::SkipRemaining).await
    }

    pub async fn import_votes(&self, token: impl Into<String>) -> Result<AppState> {
        self.dispatch(SessionEvent::ImportVotes {
            token: token.into(),
        })
        .await
    }

    pub async fn reset(&self) -> AppState {
        // Reset is legal from every mode.
        match self.dispatch(SessionEvent::Reset).await {
            Ok(state) => state,
            Err(_) => self.snapshot().await,
        }
    }

    /// Session code for guests to join.
    pub async fn session_token(&self) -> Result<String> {
        self.state.read().await.session_token()
    }

    /// Vote code with this device's likes.
    pub async fn vote_token(&self) -> Result<String> {
        self.state.read().await.vote_token()
    }

    /// Current matches, most voted first.
    pub async fn matches(&self) -> Vec<MatchSummary> {
        let state = self.state.read().await;
        state
            .matches()
            .into_iter()
            .map(|m| MatchSummary {
                candidate: m.candidate.clone(),
                votes: m.votes,
            })
            .collect()
    }
}
