use serde::{Deserialize, Serialize};

use crate::candidate::{NameCandidate, Species};
use crate::swipe::SwipeDirection;

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// "Create a game" on the landing screen.
    HostSelected,
    /// "Join a game" on the landing screen.
    JoinSelected,
    /// Leave species selection or join screen without doing anything.
    Back,
    /// A species was picked and the generator call is about to start.
    GenerationStarted { species: Species },
    GenerationSucceeded { names: Vec<NameCandidate> },
    GenerationFailed { message: String },
    /// Host is done sharing the session code.
    StartSwiping,
    /// Guest submits the pasted session code.
    SubmitSessionToken { token: String },
    Swiped { direction: SwipeDirection },
    SkipRemaining,
    /// A friend's vote code was pasted on the results screen.
    ImportVotes { token: String },
    Reset,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::HostSelected => "host_selected",
            SessionEvent::JoinSelected => "join_selected",
            SessionEvent::Back => "back",
            SessionEvent::GenerationStarted { .. } => "generation_started",
            SessionEvent::GenerationSucceeded { .. } => "generation_succeeded",
            SessionEvent::GenerationFailed { .. } => "generation_failed",
            SessionEvent::StartSwiping => "start_swiping",
            SessionEvent::SubmitSessionToken { .. } => "submit_session_token",
            SessionEvent::Swiped { .. } => "swiped",
            SessionEvent::SkipRemaining => "skip_remaining",
            SessionEvent::ImportVotes { .. } => "import_votes",
            SessionEvent::Reset => "reset",
        }
    }
}
