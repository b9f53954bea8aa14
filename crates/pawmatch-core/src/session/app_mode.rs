//! Application mode: which screen the session is on.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The screen the session is currently on.
///
/// The mode determines which parts of `AppState` are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AppMode {
    /// Start screen: host or join.
    #[default]
    Landing,
    /// Host picks the species to generate names for.
    SpeciesSelection,
    /// Waiting for the name generator. Only reset is accepted.
    Generating,
    /// Host shares the session code before voting.
    ShareSession,
    /// Guest pastes the host's session code.
    JoinSession,
    /// Deciding on each candidate.
    Swiping,
    /// Sharing one's votes and importing others'.
    ShareResults,
}

impl AppMode {
    pub fn is_loading(&self) -> bool {
        matches!(self, AppMode::Generating)
    }
}
