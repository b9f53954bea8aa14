//! The aggregate session state and its transition function.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::app_mode::AppMode;
use super::event::SessionEvent;
use super::user::UserSession;
use crate::candidate::{NameCandidate, Species};
use crate::codec;
use crate::error::{PawError, Result};
use crate::matching::{self, Match};

/// The single source of truth for one running instance.
///
/// State is never edited in place by callers: [`AppState::apply`] computes
/// the next value and the owner swaps it in. A rejected event yields an error
/// and leaves the current value untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub mode: AppMode,
    pub species: Species,
    pub candidates: Vec<NameCandidate>,
    pub local_user: UserSession,
    /// One like-list per imported vote code, in import order.
    pub imported_likes: Vec<Vec<String>>,
    pub is_host: bool,
    /// Index of the card being decided while swiping.
    pub cursor: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Landing,
            species: Species::default(),
            candidates: Vec::new(),
            local_user: UserSession::default(),
            imported_likes: Vec::new(),
            is_host: true,
            cursor: 0,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the state that follows `event`.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` when the event is not legal in the current mode
    /// - `DecodeError` / `ShapeValidationFailure` for unreadable session codes
    /// - `InvalidVoteCode` for unreadable vote codes
    pub fn apply(&self, event: SessionEvent) -> Result<AppState> {
        let event_name = event.name();
        let mut next = self.clone();

        match (self.mode, event) {
            (_, SessionEvent::Reset) => {
                next = AppState::default();
            }

            (AppMode::Landing, SessionEvent::HostSelected) => {
                next.mode = AppMode::SpeciesSelection;
                next.is_host = true;
            }
            (AppMode::Landing, SessionEvent::JoinSelected) => {
                next.mode = AppMode::JoinSession;
                next.is_host = false;
            }
            (AppMode::SpeciesSelection | AppMode::JoinSession, SessionEvent::Back) => {
                next.mode = AppMode::Landing;
            }

            (AppMode::SpeciesSelection, SessionEvent::GenerationStarted { species }) => {
                next.mode = AppMode::Generating;
                next.species = species;
                next.local_user = next.local_user.into_host();
            }
            (AppMode::Generating, SessionEvent::GenerationSucceeded { names }) => {
                debug!(count = names.len(), "storing generated candidates");
                next.candidates = names;
                next.mode = AppMode::ShareSession;
            }
            (AppMode::Generating, SessionEvent::GenerationFailed { .. }) => {
                next.mode = AppMode::Landing;
            }

            (AppMode::ShareSession, SessionEvent::StartSwiping) => {
                next.enter_swiping();
            }

            (AppMode::JoinSession, SessionEvent::SubmitSessionToken { token }) => {
                let payload = codec::decode_session(&token)?;
                next.candidates = payload.names;
                next.species = payload.species;
                next.local_user = next.local_user.into_guest();
                next.enter_swiping();
            }

            (AppMode::Swiping, SessionEvent::Swiped { direction }) => {
                if let Some(current) = self.current_candidate() {
                    if direction.is_like() {
                        next.local_user.like(current.id.clone());
                    }
                    next.cursor += 1;
                }
                if next.cursor >= next.candidates.len() {
                    next.mode = AppMode::ShareResults;
                }
            }
            (AppMode::Swiping, SessionEvent::SkipRemaining) => {
                next.mode = AppMode::ShareResults;
            }

            (AppMode::ShareResults, SessionEvent::ImportVotes { token }) => {
                let payload = codec::decode_votes(&token)?;
                next.imported_likes.push(payload.likes);
            }

            (mode, _) => return Err(PawError::invalid_transition(mode, event_name)),
        }

        if next.mode != self.mode {
            info!(from = %self.mode, to = %next.mode, event = event_name, "session transition");
        }
        Ok(next)
    }

    fn enter_swiping(&mut self) {
        self.cursor = 0;
        self.mode = if self.candidates.is_empty() {
            AppMode::ShareResults
        } else {
            AppMode::Swiping
        };
    }

    pub fn is_loading(&self) -> bool {
        self.mode.is_loading()
    }

    /// The card currently being decided, while swiping.
    pub fn current_candidate(&self) -> Option<&NameCandidate> {
        if self.mode == AppMode::Swiping {
            self.candidates.get(self.cursor)
        } else {
            None
        }
    }

    /// Up to `n` upcoming cards starting with the current one.
    pub fn upcoming(&self, n: usize) -> &[NameCandidate] {
        let start = self.cursor.min(self.candidates.len());
        let end = (start + n).min(self.candidates.len());
        &self.candidates[start..end]
    }

    pub fn remaining(&self) -> usize {
        self.candidates.len().saturating_sub(self.cursor)
    }

    /// Matches over the current likes, recomputed on every call.
    pub fn matches(&self) -> Vec<Match<'_>> {
        matching::find_matches(
            &self.candidates,
            &self.local_user.likes,
            &self.imported_likes,
        )
    }

    /// Number of friends whose votes were imported.
    pub fn friends_added(&self) -> usize {
        self.imported_likes.len()
    }

    /// The code the host shares so others can vote on the same names.
    pub fn session_token(&self) -> Result<String> {
        codec::encode_session(&self.candidates, self.species)
    }

    /// The code sharing this device's likes.
    pub fn vote_token(&self) -> Result<String> {
        codec::encode_votes(&self.local_user.likes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swipe::SwipeDirection;

    fn candidates(ids: &[&str]) -> Vec<NameCandidate> {
        ids.iter()
            .map(|id| NameCandidate {
                id: id.to_string(),
                name: format!("Nombre {id}"),
                meaning: "Significado".to_string(),
                tags: vec!["tierno".to_string()],
            })
            .collect()
    }

    fn step(state: AppState, event: SessionEvent) -> AppState {
        state.apply(event).unwrap()
    }

    fn swipe(state: AppState, direction: SwipeDirection) -> AppState {
        step(state, SessionEvent::Swiped { direction })
    }

    fn swiping_with(ids: &[&str]) -> AppState {
        let state = step(AppState::new(), SessionEvent::HostSelected);
        let state = step(state, SessionEvent::GenerationStarted { species: Species::Dog });
        let state = step(
            state,
            SessionEvent::GenerationSucceeded {
                names: candidates(ids),
            },
        );
        step(state, SessionEvent::StartSwiping)
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.mode, AppMode::Landing);
        assert_eq!(state.species, Species::Dog);
        assert!(state.candidates.is_empty());
        assert!(state.imported_likes.is_empty());
        assert!(state.is_host);
        assert_eq!(state.local_user.user_id, "1");
    }

    #[test]
    fn test_host_flow_to_results() {
        let state = step(AppState::new(), SessionEvent::HostSelected);
        assert_eq!(state.mode, AppMode::SpeciesSelection);

        let state = step(state, SessionEvent::GenerationStarted { species: Species::Dog });
        assert!(state.is_loading());
        assert_eq!(state.local_user.user_id, "host");

        let state = step(
            state,
            SessionEvent::GenerationSucceeded {
                names: candidates(&["x", "y", "z"]),
            },
        );
        assert_eq!(state.mode, AppMode::ShareSession);

        let state = step(state, SessionEvent::StartSwiping);
        assert_eq!(state.mode, AppMode::Swiping);
        assert_eq!(state.current_candidate().unwrap().id, "x");

        let state = swipe(state, SwipeDirection::Right);
        let state = swipe(state, SwipeDirection::Left);
        assert_eq!(state.mode, AppMode::Swiping);
        let state = swipe(state, SwipeDirection::Right);

        assert_eq!(state.mode, AppMode::ShareResults);
        assert_eq!(state.local_user.likes, vec!["x".to_string(), "z".to_string()]);
    }

    #[test]
    fn test_generation_failure_returns_to_landing() {
        let state = step(AppState::new(), SessionEvent::HostSelected);
        let state = step(state, SessionEvent::GenerationStarted { species: Species::Cat });
        let state = step(
            state,
            SessionEvent::GenerationFailed {
                message: "503".to_string(),
            },
        );
        assert_eq!(state.mode, AppMode::Landing);
        assert!(state.candidates.is_empty());
        assert!(state.local_user.likes.is_empty());
    }

    #[test]
    fn test_loading_rejects_session_events() {
        let state = step(AppState::new(), SessionEvent::HostSelected);
        let loading = step(state, SessionEvent::GenerationStarted { species: Species::Cat });

        for event in [
            SessionEvent::Back,
            SessionEvent::StartSwiping,
            SessionEvent::GenerationStarted { species: Species::Dog },
            SessionEvent::SkipRemaining,
        ] {
            let err = loading.apply(event).unwrap_err();
            assert!(err.is_invalid_transition());
        }

        let reset = step(loading, SessionEvent::Reset);
        assert_eq!(reset, AppState::default());
    }

    #[test]
    fn test_join_with_valid_token() {
        let token = codec::encode_session(&candidates(&["a", "b"]), Species::Rabbit).unwrap();

        let state = step(AppState::new(), SessionEvent::JoinSelected);
        assert_eq!(state.mode, AppMode::JoinSession);
        assert!(!state.is_host);

        let state = step(state, SessionEvent::SubmitSessionToken { token });
        assert_eq!(state.mode, AppMode::Swiping);
        assert_eq!(state.species, Species::Rabbit);
        assert_eq!(state.candidates.len(), 2);
        assert_eq!(state.local_user.user_id, "guest");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_join_with_garbage_stays_put() {
        let joining = step(AppState::new(), SessionEvent::JoinSelected);

        for token in ["", "not a real token", "eyJsaWtlcyI6W119"] {
            let err = joining
                .apply(SessionEvent::SubmitSessionToken {
                    token: token.to_string(),
                })
                .unwrap_err();
            assert!(err.is_bad_token(), "unexpected error for {token:?}: {err}");
        }
        assert_eq!(joining.mode, AppMode::JoinSession);
        assert!(joining.candidates.is_empty());
        assert_eq!(joining.local_user, UserSession::default());
    }

    #[test]
    fn test_skip_remaining_records_nothing() {
        let state = swiping_with(&["a", "b", "c"]);
        let state = swipe(state, SwipeDirection::Right);
        let state = step(state, SessionEvent::SkipRemaining);
        assert_eq!(state.mode, AppMode::ShareResults);
        assert_eq!(state.local_user.likes, vec!["a".to_string()]);
    }

    #[test]
    fn test_empty_batch_skips_swiping() {
        let state = swiping_with(&[]);
        assert_eq!(state.mode, AppMode::ShareResults);
        assert!(state.current_candidate().is_none());
    }

    #[test]
    fn test_import_votes_and_matches() {
        let state = swiping_with(&["a", "b", "c"]);
        let state = swipe(state, SwipeDirection::Right);
        let state = swipe(state, SwipeDirection::Right);
        let state = swipe(state, SwipeDirection::Left);
        assert!(state.matches().is_empty());

        let friend = codec::encode_votes(&["a".to_string(), "c".to_string()]).unwrap();
        let state = step(state, SessionEvent::ImportVotes { token: friend });
        assert_eq!(state.mode, AppMode::ShareResults);
        assert_eq!(state.friends_added(), 1);

        let matches = state.matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].candidate.id, "a");
        assert_eq!(matches[0].votes, 2);
    }

    #[test]
    fn test_same_vote_code_twice_counts_twice() {
        let state = swiping_with(&["a"]);
        let state = swipe(state, SwipeDirection::Right);
        let token = codec::encode_votes(&["a".to_string()]).unwrap();

        let state = step(state, SessionEvent::ImportVotes { token: token.clone() });
        let state = step(state, SessionEvent::ImportVotes { token });
        assert_eq!(state.friends_added(), 2);
        assert_eq!(state.matches()[0].votes, 3);
    }

    #[test]
    fn test_bad_vote_code_leaves_results_unchanged() {
        let state = step(swiping_with(&["a"]), SessionEvent::SkipRemaining);
        let err = state
            .apply(SessionEvent::ImportVotes {
                token: "%%%".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, PawError::InvalidVoteCode(_)));
        assert!(err.user_message().contains("resultados"));
        assert!(state.imported_likes.is_empty());
    }

    #[test]
    fn test_reset_from_anywhere() {
        let state = step(swiping_with(&["a", "b"]), SessionEvent::Reset);
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_invalid_events_rejected() {
        let state = AppState::new();
        assert!(
            state
                .apply(SessionEvent::Swiped {
                    direction: SwipeDirection::Right
                })
                .unwrap_err()
                .is_invalid_transition()
        );
        assert!(state.apply(SessionEvent::Back).is_err());
    }

    #[test]
    fn test_tokens_from_state() {
        let state = swiping_with(&["a", "b"]);
        let state = swipe(state, SwipeDirection::Right);

        let session = codec::decode_session(&state.session_token().unwrap()).unwrap();
        assert_eq!(session.names, state.candidates);

        let votes = codec::decode_votes(&state.vote_token().unwrap()).unwrap();
        assert_eq!(votes.likes, vec!["a".to_string()]);
    }

    #[test]
    fn test_upcoming_cards() {
        let state = swiping_with(&["a", "b", "c", "d"]);
        let state = swipe(state, SwipeDirection::Left);
        let ids: Vec<_> = state.upcoming(2).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(state.remaining(), 3);
    }
}
