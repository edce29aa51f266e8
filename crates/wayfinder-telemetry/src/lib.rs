//! Logging and metrics setup shared by the wayfinder crates.
//!
//! Dispatch events go through `tracing`; counters, the latency histogram and
//! the route gauge go through the `metrics` facade. This crate installs the
//! subscriber and describes the metrics. Choosing a metrics exporter is up to
//! the host application.
//!
//! # Example
//!
//! ```rust,ignore
//! use wayfinder_telemetry::{init_telemetry, LogConfig, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig {
//!     logging: LogConfig::development(),
//!     ..TelemetryConfig::default()
//! })?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogOutput};

/// Shorthand for telemetry results.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Logging plus metrics switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Subscriber settings.
    pub logging: LogConfig,
    /// Describe and record dispatch metrics.
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            logging: LogConfig::production(),
            metrics_enabled: true,
        }
    }
}

/// Installs the subscriber and, when enabled, describes the metrics.
///
/// # Errors
///
/// Fails only if the subscriber cannot be installed.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    if config.metrics_enabled {
        metrics::describe_metrics();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_json_with_metrics() {
        let config = TelemetryConfig::default();
        assert!(config.metrics_enabled);
        assert_eq!(config.logging.output, LogOutput::Json);
    }

    #[test]
    fn test_metrics_only() {
        let mut config = TelemetryConfig::default();
        config.logging.enabled = false;
        assert!(init_telemetry(&config).is_ok());
    }
}
