//! Configuration file management for PawMatch.
//!
//! Secrets are read from `~/.config/pawmatch/secret.json`:
//!
//! ```json
//! { "gemini": { "api_key": "...", "model_name": "gemini-2.5-flash" } }
//! ```
//!
//! `GEMINI_API_KEY` and `GEMINI_MODEL` override the file.

use pawmatch_core::{PawError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::gemini_name_gateway::DEFAULT_GEMINI_MODEL;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Resolved settings for the Gemini name gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiSettings {
    /// Loads settings from the secret file (default location unless `path`
    /// is given) and the environment.
    ///
    /// A missing secret file is fine as long as the environment provides a key.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => get_config_path()?,
        };
        let file = if path.exists() {
            Some(load_secret_config_from(&path)?)
        } else {
            tracing::debug!("No secret file at {}", path.display());
            None
        };

        resolve(
            file,
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(MODEL_ENV).ok(),
        )
    }
}

/// Combines file and environment values; the environment wins.
pub fn resolve(
    file: Option<SecretConfig>,
    env_api_key: Option<String>,
    env_model: Option<String>,
) -> Result<GeminiSettings> {
    let gemini = file.and_then(|config| config.gemini);
    let (file_key, file_model) = match gemini {
        Some(config) => (Some(config.api_key), config.model_name),
        None => (None, None),
    };

    let api_key = env_api_key
        .filter(|key| !key.trim().is_empty())
        .or(file_key.filter(|key| !key.trim().is_empty()))
        .ok_or_else(|| {
            PawError::config(format!(
                "Gemini API key not found: set {API_KEY_ENV} or add it to {}",
                get_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "secret.json".to_string())
            ))
        })?;

    let model = env_model
        .filter(|model| !model.trim().is_empty())
        .or(file_model)
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

    Ok(GeminiSettings { api_key, model })
}

pub fn load_secret_config_from(path: &Path) -> Result<SecretConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        PawError::config(format!(
            "Failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        PawError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Returns the path to the configuration file: ~/.config/pawmatch/secret.json
pub fn get_config_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| PawError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("pawmatch").join("secret.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_secret(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("secret.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_secret_file() {
        let dir = TempDir::new().unwrap();
        let path = write_secret(
            &dir,
            r#"{"gemini": {"api_key": "file-key", "model_name": "gemini-2.0-flash"}}"#,
        );

        let config = load_secret_config_from(&path).expect("Should parse secret file");
        let gemini = config.gemini.unwrap();
        assert_eq!(gemini.api_key, "file-key");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn test_malformed_secret_file() {
        let dir = TempDir::new().unwrap();
        let path = write_secret(&dir, "{ not json");
        let err = load_secret_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration file"));
    }

    #[test]
    fn test_resolve_prefers_environment() {
        let file = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: "file-key".to_string(),
                model_name: Some("file-model".to_string()),
            }),
        };
        let settings = resolve(
            Some(file),
            Some("env-key".to_string()),
            Some("env-model".to_string()),
        )
        .unwrap();
        assert_eq!(settings.api_key, "env-key");
        assert_eq!(settings.model, "env-model");
    }

    #[test]
    fn test_resolve_defaults_model() {
        let settings = resolve(None, Some("env-key".to_string()), None).unwrap();
        assert_eq!(settings.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_resolve_without_key_fails() {
        let err = resolve(Some(SecretConfig::default()), Some("  ".to_string()), None).unwrap_err();
        assert!(matches!(err, PawError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = resolve(None, Some("super-secret".to_string()), None).unwrap();
        assert!(!format!("{settings:?}").contains("super-secret"));
    }
}
