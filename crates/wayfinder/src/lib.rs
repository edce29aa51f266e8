//! # Wayfinder
//!
//! **Declarative HTTP request routing**
//!
//! Handlers are registered with a verb, a `{placeholder}` path pattern and
//! declared parameters. A request is matched against an ordered route table,
//! its path captures and query parameters are bound to the handler's
//! parameters, the handler runs behind a fault boundary and its result is
//! normalized to text, a view or a JSON envelope.
//!
//! ## Quick Start
//!
//! ```rust
//! use wayfinder::prelude::*;
//! use http::Method;
//!
//! let registry = Registry::new()
//!     .route(
//!         RouteDescriptor::get(
//!             "/greet/{name}",
//!             HandlerFn::new(|args: &BoundArguments| Ok(format!("hello {}", args.get("name")))),
//!         )
//!         .with_param(ParamSpec::string("name"))
//!         .named("GreetingController", "greet"),
//!     );
//!
//! let dispatcher = Dispatcher::new(registry.build().unwrap());
//! let rendered = dispatcher.dispatch(&RequestContext::new(Method::GET, "/greet/Ada"));
//!
//! assert_eq!(rendered, Rendered::Text("hello Ada".to_string()));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Registry ──build──▶ RouteTable ──▶ Dispatcher
//!                                       │
//! Request ─▶ lookup ─▶ ArgumentBinder ─▶ Invoker ─▶ ResponseNormalizer ─▶ Rendered
//! ```
//!
//! ## JSON envelope
//!
//! ```text
//! {"status":"success"|"error","code":<int>,["count":<int>,]"data":<value>}
//! ```
//!
//! `count` appears only when `data` is a list.

#![doc(html_root_url = "https://docs.rs/wayfinder/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dispatcher;
mod invoker;
mod normalizer;
mod registry;

pub use dispatcher::Dispatcher;
pub use invoker::Invoker;
pub use normalizer::{Rendered, ResponseNormalizer};
pub use registry::{Registry, RegistryError};

// Re-export the JSON encoder and envelope
pub use wayfinder_core::json;
pub use wayfinder_core::json::{EnvelopeStatus, JsonEnvelope};

// Re-export core types
pub use wayfinder_core::{
    Argument, BoundArguments, Controller, HandlerError, HandlerFn, HandlerResult,
    InvocationResult, ModelView, Outcome, ParamSpec, ParamType, QueryParams, RequestContext,
    RequestId, RouteDescriptor, Value,
};

// Re-export member crates
pub use wayfinder_config as config;
pub use wayfinder_extract as extract;
pub use wayfinder_router as router;
pub use wayfinder_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust
/// use wayfinder::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoundArguments, Controller, Dispatcher, HandlerError, HandlerFn, HandlerResult,
        JsonEnvelope, ModelView, ParamSpec, ParamType, QueryParams, Registry, Rendered,
        RequestContext, RouteDescriptor, Value,
    };
}
