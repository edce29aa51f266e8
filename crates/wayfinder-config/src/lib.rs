//! Typed configuration for wayfinder.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides (`PREFIX__SECTION__KEY`)
//! - Unknown fields are rejected
//!
//! # Example
//!
//! ```no_run
//! use wayfinder_config::ConfigLoader;
//!
//! # fn main() -> Result<(), wayfinder_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("wayfinder.toml")?
//!     .with_env_prefix("WAYFINDER")
//!     .load()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [routing]
//! mode = "method_aware"   # or "legacy"
//!
//! [binding]
//! conversion = "lenient"  # or "strict"
//!
//! [telemetry.logging]
//! enabled = true
//! level = "info"
//! format = "json"         # or "pretty"
//! include_location = false
//!
//! [telemetry.metrics]
//! enabled = true
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{WayfinderConfig, WayfinderConfigBuilder};
pub use error::ConfigError;
pub use loader::{ConfigFormat, ConfigLoader};
pub use schema::{
    BindingConfig, ConversionMode, LogFormat, LoggingConfig, MetricsConfig, RoutingConfig,
    RoutingMode, TelemetrySection,
};
