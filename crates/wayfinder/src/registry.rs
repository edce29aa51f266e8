//! Route registration.
//!
//! Routes are declared up front with [`Registry::route`] and compiled into a
//! [`RouteTable`] by [`Registry::build`]. Declaration order is the scan order,
//! so it decides which of two overlapping patterns wins.

use thiserror::Error;
use tracing::{debug, info, warn};
use wayfinder_core::RouteDescriptor;
use wayfinder_router::{PatternError, RouteTable, TableMode};

/// A route whose pattern did not compile.
#[derive(Debug, Error)]
#[error("invalid route {route}: {source}")]
pub struct RegistryError {
    route: String,
    #[source]
    source: PatternError,
}

impl RegistryError {
    /// Returns the offending route in `METHOD pattern -> Controller#handler`
    /// form.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the pattern error.
    #[must_use]
    pub fn pattern_error(&self) -> &PatternError {
        &self.source
    }
}

/// Ordered list of route declarations.
///
/// # Example
///
/// ```
/// use wayfinder::{BoundArguments, HandlerFn, Registry, RouteDescriptor};
/// use http::Method;
///
/// let table = Registry::new()
///     .route(RouteDescriptor::get("/health", HandlerFn::new(|_: &BoundArguments| Ok("up"))))
///     .route(RouteDescriptor::post("/users", HandlerFn::new(|_: &BoundArguments| Ok(()))))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert!(table.lookup(&Method::GET, "/HEALTH").is_some());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    mode: TableMode,
    routes: Vec<RouteDescriptor>,
}

impl Registry {
    /// Creates an empty method-aware registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the table mode used by [`build`](Self::build).
    #[must_use]
    pub fn with_mode(mut self, mode: TableMode) -> Self {
        self.mode = mode;
        self
    }

    /// Declares a route.
    #[must_use]
    pub fn route(mut self, descriptor: RouteDescriptor) -> Self {
        self.routes.push(descriptor);
        self
    }

    /// Declares every route from an iterator, in order.
    #[must_use]
    pub fn routes(mut self, descriptors: impl IntoIterator<Item = RouteDescriptor>) -> Self {
        self.routes.extend(descriptors);
        self
    }

    /// Returns the table mode.
    #[must_use]
    pub fn mode(&self) -> TableMode {
        self.mode
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compiles every declaration into a route table.
    ///
    /// A later declaration with the same key replaces the earlier one and
    /// keeps its scan position.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for the first pattern that does not compile.
    pub fn build(self) -> Result<RouteTable<RouteDescriptor>, RegistryError> {
        let mut table = RouteTable::new(self.mode);

        for descriptor in self.routes {
            let method = descriptor.method().clone();
            let pattern = descriptor.pattern().to_string();
            let label = descriptor.to_string();

            debug!(route = %label, "registering route");
            let replaced = table
                .register(method, &pattern, descriptor)
                .map_err(|source| RegistryError {
                    route: label.clone(),
                    source,
                })?;

            if let Some(previous) = replaced {
                warn!(route = %label, replaced = %previous, "duplicate route key, replacing");
            }
        }

        info!(routes = table.len(), mode = ?table.mode(), "route table built");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use wayfinder_core::{BoundArguments, HandlerFn};

    fn handler(reply: &'static str) -> HandlerFn {
        HandlerFn::new(move |_: &BoundArguments| Ok(reply))
    }

    #[test]
    fn test_build_keeps_declaration_order() {
        let table = Registry::new()
            .route(RouteDescriptor::get("/a", handler("a")))
            .route(RouteDescriptor::get("/b/{x}", handler("b")))
            .route(RouteDescriptor::delete("/a", handler("c")))
            .build()
            .unwrap();

        let patterns: Vec<_> = table.iter().map(|r| r.target().to_string()).collect();
        assert_eq!(patterns, ["GET /a", "GET /b/{x}", "DELETE /a"]);
    }

    #[test]
    fn test_duplicate_declaration_replaces() {
        let table = Registry::new()
            .route(RouteDescriptor::get("/a", handler("first")).named("A", "one"))
            .route(RouteDescriptor::get("/b", handler("other")))
            .route(RouteDescriptor::get("/A", handler("second")).named("A", "two"))
            .build()
            .unwrap();

        assert_eq!(table.len(), 2);
        let found = table.lookup(&Method::GET, "/a").unwrap();
        assert_eq!(found.target().handler_name(), "two");
        assert_eq!(table.iter().next().unwrap().target().handler_name(), "two");
    }

    #[test]
    fn test_malformed_pattern_fails_build() {
        let err = Registry::new()
            .route(RouteDescriptor::get("/ok", handler("ok")))
            .route(RouteDescriptor::get("/users/{id", handler("bad")).named("Users", "show"))
            .build()
            .unwrap_err();

        assert_eq!(err.route(), "GET /users/{id -> Users#show");
        assert!(matches!(err.pattern_error(), PatternError::Unclosed { .. }));
        assert!(err.to_string().starts_with("invalid route GET /users/{id -> Users#show"));
    }

    #[test]
    fn test_legacy_mode_ignores_verb() {
        let table = Registry::new()
            .with_mode(TableMode::Legacy)
            .route(RouteDescriptor::post("/items/{id}", handler("item")))
            .build()
            .unwrap();

        assert_eq!(table.mode(), TableMode::Legacy);
        assert!(table.lookup(&Method::GET, "/items/3").is_some());
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.build().unwrap().is_empty());
    }
}
