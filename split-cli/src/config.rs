//! TOML configuration for the bill splitter front end.
//!
//! Every key is optional. A minimal file looks like:
//!
//! ```toml
//! [logging]
//! level = "info"
//! file = "bill-splitter.log"
//!
//! [session]
//! auto_append_lines = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Logging settings, see [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// A bare level ("warn", "debug", ...) or any `EnvFilter` directive.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Whether log records are written to stderr. Stdout is reserved for the
    /// prompt and the rendered bill.
    pub stderr: bool,

    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            stderr: true,
            file: None,
        }
    }
}

/// Behaviour of the interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Keep one blank line at the end of the tax and charge lists by
    /// appending a new line whenever the last one is filled.
    pub auto_append_lines: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_append_lines: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
