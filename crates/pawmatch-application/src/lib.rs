//! Application layer for PawMatch.
//!
//! Owns the single session state and drives it through the core state
//! machine, including the asynchronous call to the name generator.

pub mod copy_feedback;
pub mod session_usecase;

pub use copy_feedback::{ClipboardSink, CopyFeedback};
pub use session_usecase::{MatchSummary, SessionUseCase};
