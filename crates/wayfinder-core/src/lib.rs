//! # Wayfinder Core
//!
//! Core types shared by the wayfinder crates.
//!
//! - [`Value`] - Dynamic value bound into handlers and returned from them
//! - [`RequestContext`] / [`RequestId`] - Per-request facts from the transport
//! - [`QueryParams`] - Multi-valued query parameters
//! - [`ParamSpec`] / [`ParamType`] - Declared handler parameters
//! - [`HandlerFn`] / [`Controller`] - Registered handler functions
//! - [`RouteDescriptor`] - Route registration record
//! - [`InvocationResult`] / [`ModelView`] - Handler results
//! - [`json`] - JSON encoding and the response envelope
//! - [`HandlerError`] - Handler failures

#![doc(html_root_url = "https://docs.rs/wayfinder-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod descriptor;
mod error;
mod handler;
mod invocation;
pub mod json;
mod param;
mod query;
mod value;

pub use context::{RequestContext, RequestId};
pub use descriptor::RouteDescriptor;
pub use error::{BoxError, HandlerError, HandlerResult};
pub use handler::{Argument, BoundArguments, Controller, HandlerFn};
pub use invocation::{InvocationResult, ModelView, Outcome};
pub use json::JsonEnvelope;
pub use param::{ParamSpec, ParamType};
pub use query::QueryParams;
pub use value::Value;
