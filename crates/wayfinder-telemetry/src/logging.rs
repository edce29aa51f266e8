//! Structured logging for wayfinder.
//!
//! [`init_logging`] installs a `tracing-subscriber` registry carrying one
//! `fmt` layer, filtered by an [`EnvFilter`] directive. Production output is
//! one JSON object per event; development output is the multi-line pretty
//! format.
//!
//! # Example
//!
//! ```rust,ignore
//! use wayfinder_telemetry::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//!
//! tracing::info!(route = "UserController#show", "dispatching");
//! ```

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// How events are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable, multi-line.
    Pretty,
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Install a subscriber at all.
    pub enabled: bool,
    /// `EnvFilter` directive, e.g. `info` or `wayfinder=debug,warn`.
    pub filter: String,
    /// Rendering.
    pub output: LogOutput,
    /// Emit span open/close events.
    pub span_events: bool,
    /// Attach source file and line.
    pub source_location: bool,
    /// Attach the emitting thread's id.
    pub thread_ids: bool,
    /// Attach the event target (module path).
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Pretty output at `debug`, with span events and source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            filter: "debug".to_string(),
            output: LogOutput::Pretty,
            span_events: true,
            source_location: true,
            thread_ids: false,
            target: true,
        }
    }

    /// JSON output at `info`.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            filter: "info".to_string(),
            output: LogOutput::Json,
            span_events: false,
            source_location: false,
            thread_ids: false,
            target: true,
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = tracing_subscriber::fmt::layer()
            .with_span_events(self.span_events())
            .with_file(self.source_location)
            .with_line_number(self.source_location)
            .with_thread_ids(self.thread_ids)
            .with_target(self.target);

        match self.output {
            LogOutput::Json => layer.json().boxed(),
            LogOutput::Pretty => layer.pretty().boxed(),
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// Nothing is installed when `config.enabled` is false.
///
/// # Errors
///
/// [`TelemetryError::InvalidConfig`] when the filter directive does not parse,
/// [`TelemetryError::LoggingInit`] when a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.filter)?;
    tracing_subscriber::registry()
        .with(config.fmt_layer().with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Parses an `EnvFilter` directive.
///
/// # Errors
///
/// [`TelemetryError::InvalidConfig`] if the directive does not parse.
pub fn create_env_filter(directive: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| TelemetryError::InvalidConfig(format!("log filter '{directive}': {e}")))
}

/// Debug event for a finished dispatch.
#[macro_export]
macro_rules! log_dispatch_complete {
    ($request_id:expr, $route:expr, $outcome:expr, $duration_ms:expr) => {
        tracing::debug!(
            request_id = %$request_id,
            route = %$route,
            outcome = $outcome,
            duration_ms = $duration_ms,
            "dispatch finished"
        )
    };
}

/// Error event for a handler that failed or panicked.
#[macro_export]
macro_rules! log_dispatch_error {
    ($request_id:expr, $route:expr, $error:expr) => {
        tracing::error!(
            request_id = %$request_id,
            route = %$route,
            error = %$error,
            "handler failed"
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured(emit: impl FnOnce()) -> String {
        let sink = Sink::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        let bytes = sink.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_dispatch_complete_fields() {
        let out = captured(|| log_dispatch_complete!("r-1", "UserController#show", "ok", 4_u64));
        assert!(out.contains(r#""message":"dispatch finished""#), "{out}");
        assert!(out.contains(r#""request_id":"r-1""#), "{out}");
        assert!(out.contains(r#""route":"UserController#show""#), "{out}");
        assert!(out.contains(r#""outcome":"ok""#), "{out}");
        assert!(out.contains(r#""duration_ms":4"#), "{out}");
    }

    #[test]
    fn test_dispatch_error_fields() {
        let out = captured(|| log_dispatch_error!("r-2", "/fail", "upstream timed out"));
        assert!(out.contains(r#""level":"ERROR""#), "{out}");
        assert!(out.contains(r#""error":"upstream timed out""#), "{out}");
    }

    #[test]
    fn test_presets() {
        let dev = LogConfig::development();
        assert_eq!(dev.output, LogOutput::Pretty);
        assert_eq!(dev.span_events(), FmtSpan::NEW | FmtSpan::CLOSE);
        assert!(dev.source_location);

        let prod = LogConfig::default();
        assert_eq!(prod, LogConfig::production());
        assert_eq!(prod.output, LogOutput::Json);
        assert_eq!(prod.span_events(), FmtSpan::NONE);
        assert_eq!(prod.filter, "info");
    }

    #[test]
    fn test_filter_directives() {
        assert!(create_env_filter("warn").is_ok());
        assert!(create_env_filter("wayfinder=trace,info").is_ok());

        let err = create_env_filter("wayfinder=chatty").unwrap_err();
        assert!(err.to_string().contains("'wayfinder=chatty'"));
    }

    #[test]
    fn test_disabled_installs_nothing() {
        let config = LogConfig {
            enabled: false,
            filter: "not a directive = =".to_string(),
            ..LogConfig::development()
        };
        assert!(init_logging(&config).is_ok());
    }

    #[test]
    fn test_bad_filter_fails_before_install() {
        let config = LogConfig {
            filter: "wayfinder=loud".to_string(),
            ..LogConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::InvalidConfig(_))
        ));
    }
}
