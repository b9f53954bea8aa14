pub mod candidate;
pub mod codec;
pub mod error;
pub mod gateway;
pub mod matching;
pub mod session;
pub mod swipe;

// Re-export common types
pub use candidate::{GeneratedName, NameCandidate, Species};
pub use error::{PawError, Result};
pub use gateway::NameGateway;
pub use session::{AppMode, AppState, SessionEvent, UserSession};
pub use swipe::{CardVisuals, SwipeDirection, SwipeGesture};
