//! External collaborators for PawMatch: the Gemini name generator and the
//! secret configuration it needs.

pub mod config;
pub mod gemini_name_gateway;
pub mod prompt;

pub use config::{GeminiSettings, SecretConfig};
pub use gemini_name_gateway::{DEFAULT_GEMINI_MODEL, GeminiNameGateway};
