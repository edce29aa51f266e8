//! Errors raised while assembling a [`WayfinderConfig`](crate::WayfinderConfig).

use std::path::PathBuf;

use thiserror::Error;

/// A configuration layer that could not be applied, or a result that failed
/// validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `with_file` was pointed at a path that does not exist.
    #[error("no configuration file at {}", path.display())]
    Missing {
        /// The path that was tried.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("cannot read {}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// OS error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML, or a field this version does not know.
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON, or a field this version does not know.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither TOML nor JSON.
    #[error("unsupported configuration format '{0}' (expected toml or json)")]
    UnsupportedFormat(String),

    /// A `.env` file exists but does not parse.
    #[error("dotenv: {0}")]
    Dotenv(String),

    /// An override variable carried a value of the wrong shape.
    #[error("{var}: {reason}")]
    EnvOverride {
        /// Full variable name, prefix included.
        var: String,
        /// What was expected.
        reason: String,
    },

    /// A field holds a value that cannot be used.
    #[error("{field}: {reason}")]
    InvalidValue {
        /// Dotted path, e.g. `telemetry.logging.level`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn missing(path: impl Into<PathBuf>) -> Self {
        Self::Missing { path: path.into() }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn env_override(var: &str, reason: impl Into<String>) -> Self {
        Self::EnvOverride {
            var: var.to_string(),
            reason: reason.into(),
        }
    }

    /// Builds an [`InvalidValue`](Self::InvalidValue) error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The dotted field path or variable name the error is about, if any.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { field, .. } => Some(field),
            Self::EnvOverride { var, .. } => Some(var),
            _ => None,
        }
    }
}
