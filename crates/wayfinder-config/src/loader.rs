//! Layered configuration loading.

use std::env;
use std::fs;
use std::path::Path;

use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer};

use crate::{ConfigError, WayfinderConfig};

/// Text formats a configuration layer can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Picks the format from a name such as `toml` or `JSON`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedFormat`] for anything else.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        if name.eq_ignore_ascii_case("toml") {
            Ok(Self::Toml)
        } else if name.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(ConfigError::UnsupportedFormat(name.to_string()))
        }
    }

    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedFormat`] when the extension is missing or
    /// unknown.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))
            .and_then(Self::from_name)
    }

    fn parse(self, text: &str) -> Result<WayfinderConfig, ConfigError> {
        Ok(match self {
            Self::Toml => toml::from_str(text)?,
            Self::Json => serde_json::from_str(text)?,
        })
    }
}

/// Builds a [`WayfinderConfig`] from layers.
///
/// Layers apply in call order:
/// 1. defaults or a preset
/// 2. a TOML or JSON file (or string)
/// 3. `PREFIX__SECTION__KEY` environment variables, applied by [`load`](Self::load)
///
/// A file or string layer replaces everything before it. Fields it leaves out
/// take their defaults, not the values of an earlier preset.
///
/// # Example
///
/// ```no_run
/// use wayfinder_config::ConfigLoader;
///
/// # fn main() -> Result<(), wayfinder_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("wayfinder.toml")?
///     .with_env_prefix("WAYFINDER")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: WayfinderConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Starts from [`WayfinderConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards earlier layers.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = WayfinderConfig::default();
        self
    }

    /// Switches to the development preset.
    ///
    /// ```
    /// use wayfinder_config::{ConfigLoader, ConversionMode};
    ///
    /// let config = ConfigLoader::new().with_development().load().unwrap();
    /// assert_eq!(config.binding.conversion, ConversionMode::Strict);
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = WayfinderConfig::development();
        self
    }

    /// Switches to the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = WayfinderConfig::production();
        self
    }

    /// Reads a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Missing or unreadable files, unknown extensions, malformed content and
    /// unknown fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::missing(path));
        }
        let format = ConfigFormat::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        self.config = format.parse(&text)?;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// As `with_file`, once the file exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Parses configuration text; `format` is `toml` or `json`.
    ///
    /// # Errors
    ///
    /// Unknown formats and content that does not parse.
    ///
    /// ```
    /// use wayfinder_config::{ConfigLoader, RoutingMode};
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[routing]\nmode = \"legacy\"", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.routing.mode, RoutingMode::Legacy);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = ConfigFormat::from_name(format)?.parse(content)?;
        Ok(self)
    }

    /// Reads overrides from variables starting with `PREFIX__` when
    /// [`load`](Self::load) runs. The prefix is upper-cased.
    ///
    /// With prefix `WAYFINDER`, `WAYFINDER__ROUTING__MODE=legacy` sets
    /// `routing.mode` and `WAYFINDER__TELEMETRY__LOGGING__LEVEL=debug` sets
    /// `telemetry.logging.level`. Variables naming no known field are ignored.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Loads `.env` into the process environment. A missing file is fine.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Dotenv`] when a `.env` file exists but does not parse.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Err(e) if !e.not_found() => Err(ConfigError::Dotenv(e.to_string())),
            _ => Ok(self),
        }
    }

    /// Applies environment overrides, then validates.
    ///
    /// # Errors
    ///
    /// An override of the wrong shape, or a configuration that fails
    /// [`WayfinderConfig::validate`].
    pub fn load(mut self) -> Result<WayfinderConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            let marker = format!("{prefix}__");
            let mut vars: Vec<_> = env::vars().filter(|(k, _)| k.starts_with(&marker)).collect();
            vars.sort();
            for (var, value) in &vars {
                self.apply_override(var, &var[marker.len()..], value)?;
            }
        }
        self.config.validate()?;
        Ok(self.config)
    }

    /// The configuration as layered so far, without overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> WayfinderConfig {
        self.config
    }

    /// `field` is the variable name with its `PREFIX__` removed.
    fn apply_override(&mut self, var: &str, field: &str, value: &str) -> Result<(), ConfigError> {
        let logging = &mut self.config.telemetry.logging;
        match field {
            "ROUTING__MODE" => self.config.routing.mode = parse_choice(var, value)?,
            "BINDING__CONVERSION" => self.config.binding.conversion = parse_choice(var, value)?,
            "TELEMETRY__LOGGING__ENABLED" => logging.enabled = parse_flag(var, value)?,
            "TELEMETRY__LOGGING__LEVEL" => logging.level = value.to_string(),
            "TELEMETRY__LOGGING__FORMAT" => logging.format = parse_choice(var, value)?,
            "TELEMETRY__LOGGING__INCLUDE_LOCATION" => {
                logging.include_location = parse_flag(var, value)?;
            }
            "TELEMETRY__METRICS__ENABLED" => {
                self.config.telemetry.metrics.enabled = parse_flag(var, value)?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Reads a unit enum variant by its serialized (snake_case) name.
fn parse_choice<T: DeserializeOwned>(var: &str, value: &str) -> Result<T, ConfigError> {
    let lowered = value.to_ascii_lowercase();
    let de: StrDeserializer<'_, ValueError> = lowered.as_str().into_deserializer();
    T::deserialize(de).map_err(|e| ConfigError::env_override(var, e.to_string()))
}

fn parse_flag(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::env_override(
            var,
            format!("'{value}' is not a boolean"),
        )),
    }
}
