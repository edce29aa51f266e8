//! The route table.
//!
//! Routes are kept in registration order. Lookup first tries an exact key
//! (`METHOD:path`, or just `path` in legacy mode) and then scans the routes in
//! order, returning the first whose pattern matches. Registration order is
//! therefore part of the observable contract: among overlapping patterns the
//! first registered wins.

use std::collections::HashMap;

use http::Method;

use crate::error::PatternError;
use crate::params::Params;
use crate::pattern::CompiledPattern;

/// How routes are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableMode {
    /// Routes are keyed by `METHOD:pattern`; lookup requires the verb to match.
    #[default]
    MethodAware,
    /// Routes are keyed by pattern only; the verb is ignored on lookup.
    Legacy,
}

/// A registered route: verb, compiled pattern and the caller's payload.
#[derive(Debug, Clone)]
pub struct Route<T> {
    method: Method,
    pattern: CompiledPattern,
    target: T,
}

impl<T> Route<T> {
    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Returns the payload registered with the route.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }
}

/// A successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a, T> {
    route: &'a Route<T>,
    params: Params,
}

impl<'a, T> RouteMatch<'a, T> {
    /// Returns the matched route.
    #[must_use]
    pub fn route(&self) -> &'a Route<T> {
        self.route
    }

    /// Returns the payload of the matched route.
    #[must_use]
    pub fn target(&self) -> &'a T {
        &self.route.target
    }

    /// Returns the captured path parameters, aligned with the pattern's names.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Splits the match into payload and captures.
    #[must_use]
    pub fn into_parts(self) -> (&'a T, Params) {
        (&self.route.target, self.params)
    }
}

/// An ordered route table.
///
/// Built once during startup and read-only afterwards; `lookup` takes
/// `&self` and needs no locking.
///
/// # Example
///
/// ```rust
/// use wayfinder_router::{RouteTable, TableMode};
/// use http::Method;
///
/// let mut table = RouteTable::new(TableMode::MethodAware);
/// table.register(Method::GET, "/users/{id}", "show").unwrap();
/// table.register(Method::DELETE, "/users/{id}", "destroy").unwrap();
///
/// let found = table.lookup(&Method::DELETE, "/users/9").unwrap();
/// assert_eq!(*found.target(), "destroy");
/// assert_eq!(found.params().get("id"), Some("9"));
///
/// assert!(table.lookup(&Method::POST, "/users/9").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    mode: TableMode,
    routes: Vec<Route<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new(TableMode::default())
    }
}

impl<T> RouteTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new(mode: TableMode) -> Self {
        Self {
            mode,
            routes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the keying mode.
    #[must_use]
    pub fn mode(&self) -> TableMode {
        self.mode
    }

    /// Compiles `pattern` and registers a route.
    ///
    /// On a duplicate key the new route replaces the old one in place, keeping
    /// the original scan position, and the previous payload is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern is malformed.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        target: T,
    ) -> Result<Option<T>, PatternError> {
        let compiled = CompiledPattern::compile(pattern)?;
        let key = self.key(&method, pattern);
        let route = Route {
            method,
            pattern: compiled,
            target,
        };

        if let Some(&slot) = self.index.get(&key) {
            let previous = std::mem::replace(&mut self.routes[slot], route);
            return Ok(Some(previous.target));
        }

        self.index.insert(key, self.routes.len());
        self.routes.push(route);
        Ok(None)
    }

    /// Finds the route for a request.
    ///
    /// An exact key hit on a placeholder-free pattern wins; otherwise routes
    /// are scanned in registration order. Paths and verbs compare
    /// case-insensitively.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, T>> {
        if let Some(&slot) = self.index.get(&self.key(method, path)) {
            let route = &self.routes[slot];
            if route.pattern.is_static() {
                return Some(RouteMatch {
                    route,
                    params: Params::new(),
                });
            }
        }

        self.routes
            .iter()
            .filter(|route| self.mode == TableMode::Legacy || same_verb(&route.method, method))
            .find_map(|route| {
                route
                    .pattern
                    .captures(path)
                    .map(|params| RouteMatch { route, params })
            })
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates routes in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &Route<T>> {
        self.routes.iter()
    }

    fn key(&self, method: &Method, path: &str) -> String {
        match self.mode {
            TableMode::MethodAware => format!(
                "{}:{}",
                method.as_str().to_ascii_uppercase(),
                path.to_lowercase()
            ),
            TableMode::Legacy => path.to_lowercase(),
        }
    }
}

// `Method` equality is byte-exact, so `get` built via `from_bytes` differs from `GET`.
fn same_verb(registered: &Method, requested: &Method) -> bool {
    registered.as_str().eq_ignore_ascii_case(requested.as_str())
}
