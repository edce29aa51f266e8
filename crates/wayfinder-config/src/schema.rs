//! Configuration sections.

use serde::{Deserialize, Serialize};
use wayfinder_telemetry::{LogConfig, LogOutput, TelemetryConfig};

/// How the route table keys and filters routes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    /// Keys include the verb and lookups filter on it.
    #[default]
    MethodAware,
    /// Keys are the pattern only; the verb is ignored on lookup.
    Legacy,
}

/// Routing section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Table mode.
    #[serde(default)]
    pub mode: RoutingMode,
}

/// What the binder does with a value that does not convert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Bind null and log a warning.
    #[default]
    Lenient,
    /// Reject the request with a 400.
    Strict,
}

/// Binding section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    /// Conversion failure handling.
    #[serde(default)]
    pub conversion: ConversionMode,
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (trace, debug, info, warn, error, or per-target).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::Json,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the subscriber settings understood by `init_logging`.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        let base = match self.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };
        LogConfig {
            enabled: self.enabled,
            filter: self.level.clone(),
            source_location: self.include_location,
            ..base
        }
    }
}

/// Metrics settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Record dispatch metrics.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Telemetry section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics settings.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl TelemetrySection {
    /// Converts to the settings understood by `init_telemetry`.
    #[must_use]
    pub fn to_telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            logging: self.logging.to_log_config(),
            metrics_enabled: self.metrics.enabled,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_mode_names() {
        let routing: RoutingConfig = toml::from_str("mode = \"legacy\"").unwrap();
        assert_eq!(routing.mode, RoutingMode::Legacy);

        let routing: RoutingConfig = toml::from_str("mode = \"method_aware\"").unwrap();
        assert_eq!(routing.mode, RoutingMode::MethodAware);

        assert!(toml::from_str::<RoutingConfig>("mode = \"fuzzy\"").is_err());
    }

    #[test]
    fn test_conversion_mode_names() {
        let binding: BindingConfig = toml::from_str("conversion = \"strict\"").unwrap();
        assert_eq!(binding.conversion, ConversionMode::Strict);
        assert_eq!(BindingConfig::default().conversion, ConversionMode::Lenient);
    }

    #[test]
    fn test_logging_defaults() {
        let logging: LoggingConfig = toml::from_str("").unwrap();
        assert_eq!(logging, LoggingConfig::default());
        assert!(logging.enabled);
        assert_eq!(logging.level, "info");
    }

    #[test]
    fn test_to_log_config() {
        let logging = LoggingConfig {
            enabled: true,
            level: "wayfinder=trace".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
        };
        let log = logging.to_log_config();
        assert_eq!(log.output, LogOutput::Pretty);
        assert!(!log.source_location);
        assert_eq!(log.filter, "wayfinder=trace");

        let log = LoggingConfig::default().to_log_config();
        assert_eq!(log.output, LogOutput::Json);
    }

    #[test]
    fn test_to_telemetry_config() {
        let section = TelemetrySection {
            metrics: MetricsConfig { enabled: false },
            ..TelemetrySection::default()
        };
        let telemetry = section.to_telemetry_config();
        assert!(!telemetry.metrics_enabled);
        assert!(telemetry.logging.enabled);
    }
}
