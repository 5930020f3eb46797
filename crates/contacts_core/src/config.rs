//! Runtime configuration for the contact core.
//!
//! # Responsibility
//! - Hold tunables for search and avatar intake in one place.
//! - Provide safe defaults so callers can start with `CoreConfig::default()`.
//! - Load overrides from a JSON document; missing keys keep their defaults.
//!
//! # Invariants
//! - MIME types in `AvatarPolicy::allowed_mime_types` are lowercase.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default upper bound for an embedded avatar image.
pub const DEFAULT_AVATAR_MAX_BYTES: usize = 2 * 1024 * 1024;

const DEFAULT_AVATAR_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Configuration loading failure.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level configuration consumed by services and the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoreConfig {
    pub search: SearchPolicy,
    pub avatar: AvatarPolicy,
}

/// Controls which fields participate in text search.
///
/// `name`, `email` and `job_title` are always searched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchPolicy {
    pub include_department: bool,
}

/// Limits applied when an image is embedded into a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvatarPolicy {
    pub max_bytes: usize,
    pub allowed_mime_types: Vec<String>,
}

impl Default for AvatarPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_AVATAR_MAX_BYTES,
            allowed_mime_types: DEFAULT_AVATAR_MIME_TYPES
                .iter()
                .map(|mime| (*mime).to_string())
                .collect(),
        }
    }
}

impl CoreConfig {
    /// Parses a JSON document such as
    /// `{"search": {"includeDepartment": true}, "avatar": {"maxBytes": 65536}}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.avatar.allowed_mime_types = config
            .avatar
            .allowed_mime_types
            .iter()
            .map(|mime| mime.trim().to_ascii_lowercase())
            .collect();
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl AvatarPolicy {
    /// Returns whether `mime` is accepted, ignoring case and parameters.
    pub fn allows(&self, mime: &str) -> bool {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        self.allowed_mime_types
            .iter()
            .any(|allowed| *allowed == essence)
    }
}
