//! Root configuration type.

use serde::{Deserialize, Serialize};

use crate::{BindingConfig, ConversionMode, LogFormat, RoutingConfig, RoutingMode, TelemetrySection};

/// Root configuration for a wayfinder dispatcher.
///
/// Unknown fields are rejected at every level.
///
/// # Example
///
/// ```
/// use wayfinder_config::{ConversionMode, RoutingMode, WayfinderConfig};
///
/// let config = WayfinderConfig::builder()
///     .routing_mode(RoutingMode::Legacy)
///     .conversion(ConversionMode::Strict)
///     .build();
///
/// assert_eq!(config.routing.mode, RoutingMode::Legacy);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct WayfinderConfig {
    /// Route table settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Argument binding settings.
    #[serde(default)]
    pub binding: BindingConfig,

    /// Logging and metrics settings.
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl WayfinderConfig {
    /// Create a builder.
    #[must_use]
    pub fn builder() -> WayfinderConfigBuilder {
        WayfinderConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the log filter is empty or does
    /// not parse.
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        let level = &self.telemetry.logging.level;
        if level.trim().is_empty() {
            return Err(crate::ConfigError::invalid_value(
                "telemetry.logging.level",
                "must not be empty",
            ));
        }

        if self.telemetry.logging.enabled {
            wayfinder_telemetry::create_env_filter(level).map_err(|e| {
                crate::ConfigError::invalid_value("telemetry.logging.level", e.to_string())
            })?;
        }

        Ok(())
    }

    /// Development preset: pretty debug logs with source locations and strict
    /// binding, so conversion mistakes surface early.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.binding.conversion = ConversionMode::Strict;
        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config.telemetry.logging.include_location = true;
        config
    }

    /// Production preset: JSON info logs and lenient binding.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }
}

/// Builder for [`WayfinderConfig`].
#[derive(Debug, Default)]
pub struct WayfinderConfigBuilder {
    config: WayfinderConfig,
}

impl WayfinderConfigBuilder {
    /// Create a builder starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the routing mode.
    #[must_use]
    pub fn routing_mode(mut self, mode: RoutingMode) -> Self {
        self.config.routing.mode = mode;
        self
    }

    /// Set the conversion mode.
    #[must_use]
    pub fn conversion(mut self, conversion: ConversionMode) -> Self {
        self.config.binding.conversion = conversion;
        self
    }

    /// Set the whole telemetry section.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TelemetrySection) -> Self {
        self.config.telemetry = telemetry;
        self
    }

    /// Set the log filter directive.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.telemetry.logging.level = level.into();
        self
    }

    /// Build without validation.
    #[must_use]
    pub fn build(self) -> WayfinderConfig {
        self.config
    }

    /// Build and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<WayfinderConfig, crate::ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
