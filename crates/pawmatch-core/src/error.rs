//! Error types for PawMatch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-facing text shown when a pasted session code cannot be read.
const BAD_CODE_MESSAGE: &str = "El código parece incorrecto. Asegúrate de copiarlo completo.";

/// User-facing text shown when a friend's vote code cannot be read.
const BAD_VOTE_CODE_MESSAGE: &str =
    "Código de resultados inválido. Verifica que copiaste todo el texto.";

/// User-facing text shown when the name generator fails.
const GENERATION_MESSAGE: &str = "No pudimos conectar con la inspiración. Inténtalo de nuevo.";

/// A shared error type for the entire PawMatch workspace.
///
/// Every variant is recoverable: the session either stays where it was or
/// returns to the landing screen, and the user can retry.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PawError {
    /// The name generation gateway rejected or failed the request.
    #[error("Name generation failed: {0}")]
    GenerationFailure(String),

    /// A pasted token is not valid output of the codec.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// A token decoded to valid JSON that lacks a required field.
    #[error("Shape validation failed: missing or invalid '{field}'")]
    ShapeValidationFailure { field: String },

    /// A pasted vote code failed to decode or lacks its `likes` list.
    #[error("Invalid vote code: {0}")]
    InvalidVoteCode(String),

    /// The event is not legal in the current mode.
    #[error("Invalid transition: '{event}' is not allowed in mode '{mode}'")]
    InvalidTransition { mode: String, event: String },

    /// Configuration error (missing API key, unreadable secret file, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization error outside of token decoding
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl PawError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a GenerationFailure error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationFailure(message.into())
    }

    /// Creates a DecodeError
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError(message.into())
    }

    /// Creates a ShapeValidationFailure for the named field
    pub fn shape(field: impl Into<String>) -> Self {
        Self::ShapeValidationFailure {
            field: field.into(),
        }
    }

    /// Wraps a decode or shape failure of a vote code
    pub fn vote_code(source: PawError) -> Self {
        match source {
            Self::InvalidVoteCode(_) => source,
            other => Self::InvalidVoteCode(other.to_string()),
        }
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(mode: impl ToString, event: impl Into<String>) -> Self {
        Self::InvalidTransition {
            mode: mode.to_string(),
            event: event.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// True for malformed tokens and tokens missing a required field.
    pub fn is_bad_token(&self) -> bool {
        matches!(
            self,
            Self::DecodeError(_)
                | Self::ShapeValidationFailure { .. }
                | Self::InvalidVoteCode(_)
        )
    }

    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::GenerationFailure(_))
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// The single human-readable message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::DecodeError(_) | Self::ShapeValidationFailure { .. } => {
                BAD_CODE_MESSAGE.to_string()
            }
            Self::InvalidVoteCode(_) => BAD_VOTE_CODE_MESSAGE.to_string(),
            Self::GenerationFailure(_) => GENERATION_MESSAGE.to_string(),
            Self::InvalidTransition { .. } => "Esa acción no está disponible ahora.".to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PawError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PawError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PawError>`.
pub type Result<T> = std::result::Result<T, PawError>;
