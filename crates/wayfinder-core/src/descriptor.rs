//! Route descriptors.
//!
//! A [`RouteDescriptor`] is the registration record for one handler: verb,
//! pattern, declared parameters, the JSON flag and the handler itself.

use std::fmt;

use http::method::InvalidMethod;
use http::Method;

use crate::{HandlerFn, ParamSpec};

/// Immutable metadata plus the handler for one route.
///
/// # Example
///
/// ```
/// use wayfinder_core::{BoundArguments, HandlerFn, ParamSpec, ParamType, RouteDescriptor};
///
/// let route = RouteDescriptor::get(
///     "/users/{id}",
///     HandlerFn::new(|args: &BoundArguments| Ok(args.get("id").clone())),
/// )
/// .with_param(ParamSpec::new("id", ParamType::Long))
/// .produces_json()
/// .named("UserController", "show");
///
/// assert_eq!(route.to_string(), "GET /users/{id} -> UserController#show");
/// assert!(route.wants_json());
/// ```
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    controller: String,
    handler_name: String,
    method: Method,
    pattern: String,
    params: Vec<ParamSpec>,
    json: bool,
    handler: HandlerFn,
}

impl RouteDescriptor {
    /// Creates a descriptor for any verb.
    pub fn new(method: Method, pattern: impl Into<String>, handler: HandlerFn) -> Self {
        Self {
            controller: String::new(),
            handler_name: String::new(),
            method,
            pattern: pattern.into(),
            params: Vec::new(),
            json: false,
            handler,
        }
    }

    /// Creates a descriptor from a declared verb string.
    ///
    /// Verbs are case-insensitive and an empty verb means GET.
    pub fn with_verb(
        verb: &str,
        pattern: impl Into<String>,
        handler: HandlerFn,
    ) -> Result<Self, InvalidMethod> {
        let method = if verb.trim().is_empty() {
            Method::GET
        } else {
            Method::from_bytes(verb.trim().to_ascii_uppercase().as_bytes())?
        };
        Ok(Self::new(method, pattern, handler))
    }

    /// Creates a GET descriptor.
    pub fn get(pattern: impl Into<String>, handler: HandlerFn) -> Self {
        Self::new(Method::GET, pattern, handler)
    }

    /// Creates a POST descriptor.
    pub fn post(pattern: impl Into<String>, handler: HandlerFn) -> Self {
        Self::new(Method::POST, pattern, handler)
    }

    /// Creates a PUT descriptor.
    pub fn put(pattern: impl Into<String>, handler: HandlerFn) -> Self {
        Self::new(Method::PUT, pattern, handler)
    }

    /// Creates a DELETE descriptor.
    pub fn delete(pattern: impl Into<String>, handler: HandlerFn) -> Self {
        Self::new(Method::DELETE, pattern, handler)
    }

    /// Appends a declared handler parameter.
    #[must_use]
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Marks the route as JSON-producing.
    #[must_use]
    pub fn produces_json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Sets the controller and handler names used in logs and listings.
    #[must_use]
    pub fn named(mut self, controller: impl Into<String>, handler: impl Into<String>) -> Self {
        self.controller = controller.into();
        self.handler_name = handler.into();
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the route pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the declared parameters in order.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Returns true if the route produces the JSON envelope.
    #[must_use]
    pub fn wants_json(&self) -> bool {
        self.json
    }

    /// Returns the controller name, empty if unnamed.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Returns the handler name, empty if unnamed.
    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> &HandlerFn {
        &self.handler
    }

    /// Returns a label for logs and metrics: `Controller#handler` when named,
    /// otherwise the pattern.
    #[must_use]
    pub fn label(&self) -> String {
        if self.controller.is_empty() && self.handler_name.is_empty() {
            self.pattern.clone()
        } else {
            format!("{}#{}", self.controller, self.handler_name)
        }
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.pattern)?;
        if !self.controller.is_empty() || !self.handler_name.is_empty() {
            write!(f, " -> {}#{}", self.controller, self.handler_name)?;
        }
        Ok(())
    }
}
