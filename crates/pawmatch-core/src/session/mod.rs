//! Session domain module.
//!
//! - `app_mode`: which screen the session is on (`AppMode`)
//! - `user`: the local participant (`UserSession`)
//! - `event`: inputs to the state machine (`SessionEvent`)
//! - `state`: the aggregate root and its transition function (`AppState`)

mod app_mode;
mod event;
mod state;
mod user;

pub use app_mode::AppMode;
pub use event::SessionEvent;
pub use state::AppState;
pub use user::UserSession;
