//! Handler invocation.
//!
//! The invoker is the fault boundary: instantiation errors, execution errors
//! and panics all come back as [`InvocationResult::Failure`] and never unwind
//! past [`Invoker::invoke`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;
use wayfinder_core::{BoundArguments, HandlerError, InvocationResult, RouteDescriptor};

/// Runs handlers with bound arguments.
///
/// # Example
///
/// ```
/// use wayfinder::{BoundArguments, HandlerFn, Invoker, RouteDescriptor};
///
/// let route = RouteDescriptor::get(
///     "/boom",
///     HandlerFn::new(|_: &BoundArguments| -> Result<(), _> { panic!("kaboom") }),
/// );
///
/// let result = Invoker::new().invoke(&route, &BoundArguments::new());
/// assert!(result.is_failure());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Invoker;

impl Invoker {
    /// Creates an invoker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Calls the route's handler.
    #[must_use]
    pub fn invoke(&self, route: &RouteDescriptor, args: &BoundArguments) -> InvocationResult {
        debug!(route = %route.label(), args = args.len(), "invoking handler");

        let handler = route.handler();
        match panic::catch_unwind(AssertUnwindSafe(|| handler.call(args))) {
            Ok(result) => InvocationResult::from(result),
            Err(payload) => InvocationResult::failure(HandlerError::Panicked {
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::{Controller, HandlerFn, Value};

    fn route(handler: HandlerFn) -> RouteDescriptor {
        RouteDescriptor::get("/t", handler).named("TestController", "run")
    }

    #[test]
    fn test_plain_value() {
        let result = Invoker::new().invoke(
            &route(HandlerFn::new(|_: &BoundArguments| Ok(42_i64))),
            &BoundArguments::new(),
        );
        assert!(matches!(result, InvocationResult::Plain(Value::Int(42))));
    }

    #[test]
    fn test_execution_error_becomes_failure() {
        let result = Invoker::new().invoke(
            &route(HandlerFn::new(|_: &BoundArguments| -> Result<(), _> {
                Err(HandlerError::execution("database unavailable"))
            })),
            &BoundArguments::new(),
        );

        match result {
            InvocationResult::Failure { message, cause } => {
                assert_eq!(message, "database unavailable");
                assert_eq!(cause.kind(), "execution");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_panic_with_formatted_message() {
        let result = Invoker::new().invoke(
            &route(HandlerFn::new(|args: &BoundArguments| -> Result<(), _> {
                panic!("index {} out of range", args.len())
            })),
            &BoundArguments::new(),
        );

        match result {
            InvocationResult::Failure { message, cause } => {
                assert_eq!(message, "handler panicked: index 0 out of range");
                assert_eq!(cause.kind(), "panic");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_instantiation_failure() {
        struct Unbuildable;

        impl Controller for Unbuildable {
            fn instantiate() -> Result<Self, HandlerError> {
                Err(HandlerError::instantiation("Unbuildable", "missing dependency"))
            }
        }

        let result = Invoker::new().invoke(
            &route(HandlerFn::per_call(|_: &mut Unbuildable, _: &BoundArguments| Ok(()))),
            &BoundArguments::new(),
        );

        match result {
            InvocationResult::Failure { message, cause } => {
                assert_eq!(message, "failed to instantiate Unbuildable: missing dependency");
                assert_eq!(cause.kind(), "instantiation");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_panic_message_payloads() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&17_u8), "unknown panic payload");
    }
}
