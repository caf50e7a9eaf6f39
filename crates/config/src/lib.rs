//! Configuration loading for toolhand.
//!
//! Settings come from environment variables, optionally seeded from a local
//! `.env` file. The API key is the only mandatory value; everything else
//! has a default. Loading happens once at startup and the result is
//! immutable afterwards.
//!
//! Variables:
//!
//! | Variable                  | Default                       |
//! |---------------------------|-------------------------------|
//! | `TOOLHAND_API_KEY`        | (required)                    |
//! | `TOOLHAND_BASE_URL`       | `https://api.openai.com/v1`   |
//! | `TOOLHAND_MODEL`          | `gpt-4o-mini`                 |
//! | `TOOLHAND_TEMPERATURE`    | `0.2`                         |
//! | `TOOLHAND_MAX_STEPS`      | `20`                          |
//! | `TOOLHAND_MAX_HISTORY`    | `20`                          |
//! | `TOOLHAND_MAX_RETRIES`    | `3`                           |
//! | `TOOLHAND_REQUEST_TIMEOUT`| `120` (seconds)               |

use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub const API_KEY_VAR: &str = "TOOLHAND_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{API_KEY_VAR} is not set (export it or add it to a .env file)")]
    MissingApiKey,

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Immutable runtime settings.
#[derive(Clone, Serialize)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_steps: u32,
    pub max_history: usize,
    pub max_retries: u32,
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_steps", &self.max_steps)
            .field("max_history", &self.max_history)
            .field("max_retries", &self.max_retries)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// A `.env` file in the current directory (or any parent) is read into
    /// the environment first; absence of the file is not an error, absence
    /// of the API key is.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(_) => debug!("No .env file found, using process environment only"),
        }
        Self::from_env()
    }

    /// Read settings from already-populated environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: var_or("TOOLHAND_BASE_URL", "https://api.openai.com/v1"),
            model: var_or("TOOLHAND_MODEL", "gpt-4o-mini"),
            temperature: parsed_var("TOOLHAND_TEMPERATURE", 0.2)?,
            max_steps: parsed_var("TOOLHAND_MAX_STEPS", 20)?,
            max_history: parsed_var("TOOLHAND_MAX_HISTORY", 20)?,
            max_retries: parsed_var("TOOLHAND_MAX_RETRIES", 3)?,
            request_timeout_secs: parsed_var("TOOLHAND_REQUEST_TIMEOUT", 120)?,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed_var<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key: key.to_string(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    // Environment variables are process-global; serialize the tests that
    // touch them so parallel test threads don't interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn missing_api_key_is_fatal() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var(API_KEY_VAR);
        let err = Settings::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn defaults_applied() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var(API_KEY_VAR, "sk-test");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.base_url, "https://api.openai.com/v1");
        assert_eq!(settings.max_steps, 20);
        assert_eq!(settings.max_history, 20);
        assert_eq!(settings.max_retries, 3);
        assert!((settings.temperature - 0.2).abs() < f32::EPSILON);
        std::env::remove_var(API_KEY_VAR);
    }

    #[test]
    fn invalid_numeric_override_reports_key() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var(API_KEY_VAR, "sk-test");
        std::env::set_var("TOOLHAND_MAX_STEPS", "lots");
        let err = Settings::from_env().unwrap_err();
        assert!(err.to_string().contains("TOOLHAND_MAX_STEPS"));
        std::env::remove_var("TOOLHAND_MAX_STEPS");
        std::env::remove_var(API_KEY_VAR);
    }

    #[test]
    fn debug_redacts_api_key() {
        let settings = Settings {
            api_key: "sk-secret".into(),
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            temperature: 0.2,
            max_steps: 20,
            max_history: 20,
            max_retries: 3,
            request_timeout_secs: 120,
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
