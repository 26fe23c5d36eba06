//! Layered configuration for the server.
//!
//! Settings are looked up by dotted key (`server.port`, `database.url`).
//! Sources, lowest priority first:
//!
//! 1. `application.yaml`
//! 2. `application-{profile}.yaml`
//! 3. `.env`, then `.env.{profile}` (never overriding variables already set)
//! 4. the process environment, where `SERVER_PORT` means `server.port`
//!
//! Because `_` in a variable name becomes `.`, keys never contain `_`.

mod source;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use source::Values;

/// Environment variable naming the active profile. Wins over the profile
/// passed to [`BookshelfConfig::load`].
pub const PROFILE_ENV: &str = "BOOKSHELF_PROFILE";

#[derive(Debug)]
pub enum ConfigError {
    NotFound(String),
    /// The key is present but its text does not parse as the requested type.
    Invalid { key: String, reason: String },
    Load(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "missing configuration key '{key}'"),
            ConfigError::Invalid { key, reason } => {
                write!(f, "invalid value for '{key}': {reason}")
            }
            ConfigError::Load(msg) => write!(f, "cannot load configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Default)]
pub struct BookshelfConfig {
    profile: String,
    values: Values,
}

impl BookshelfConfig {
    /// Load from the working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile)
    }

    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_owned());
        let mut values = Values::new();

        source::yaml_file(&dir.join("application.yaml"), &mut values)?;
        source::yaml_file(&dir.join(format!("application-{profile}.yaml")), &mut values)?;
        source::dotenv_file(&dir.join(".env"))?;
        source::dotenv_file(&dir.join(format!(".env.{profile}")))?;
        source::environment(&mut values);

        tracing::debug!(%profile, keys = values.len(), "configuration loaded");
        Ok(Self { profile, values })
    }

    /// Configuration from a YAML document alone, without files or environment.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = Values::new();
        source::yaml_str(yaml, &mut values)?;
        Ok(Self {
            profile: profile.to_owned(),
            values,
        })
    }

    /// No keys at all, under the `test` profile.
    pub fn empty() -> Self {
        Self {
            profile: "test".to_owned(),
            values: Values::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parse the value stored under `key`.
    pub fn get<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_owned()))?;
        raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_owned(),
            reason: format!("{raw:?}: {e}"),
        })
    }

    /// Like [`get`](Self::get), falling back to `default` only when the key
    /// is absent. A value that fails to parse is still an error.
    pub fn get_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.get(key) {
            Err(ConfigError::NotFound(_)) => Ok(default),
            found => found,
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }
}
