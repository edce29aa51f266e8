//! Telemetry setup errors.

use thiserror::Error;

/// Why telemetry could not be installed.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The global subscriber could not be set, usually because one already is.
    #[error("logging already initialized or unavailable: {0}")]
    LoggingInit(String),

    /// A setting was rejected before anything was installed.
    #[error("bad telemetry setting: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_detail() {
        let err = TelemetryError::LoggingInit("global default already set".to_string());
        assert!(err.to_string().ends_with("global default already set"));

        let err = TelemetryError::InvalidConfig("log filter 'x=y': invalid".to_string());
        assert_eq!(err.to_string(), "bad telemetry setting: log filter 'x=y': invalid");
    }
}
