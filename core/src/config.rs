//! Service configuration: endpoint URL and public API key.
//!
//! Values come from `SUPABASE_URL` and `SUPABASE_ANON_KEY`, with a `.env`
//! file in the working directory loaded first when present.

use std::fmt;
use std::path::Path;

use crate::error::ConfigError;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Immutable connection settings shared by every request a client makes.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    url: String,
    anon_key: String,
}

impl ClientConfig {
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let url = url.trim().trim_end_matches('/');
        let anon_key = anon_key.trim();

        if url.is_empty() {
            return Err(ConfigError::Empty(URL_VAR.to_string()));
        }
        if anon_key.is_empty() {
            return Err(ConfigError::Empty(ANON_KEY_VAR.to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }

        Ok(Self {
            url: url.to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // .env is optional
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load `path` into the environment, then read it like `from_env`.
    /// Variables already set in the process win over the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())
            .map_err(|e| ConfigError::EnvFile(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like `from_env`, but resolves variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(URL_VAR).ok_or_else(|| ConfigError::MissingVar(URL_VAR.to_string()))?;
        let anon_key =
            lookup(ANON_KEY_VAR).ok_or_else(|| ConfigError::MissingVar(ANON_KEY_VAR.to_string()))?;
        Self::new(&url, &anon_key)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}
