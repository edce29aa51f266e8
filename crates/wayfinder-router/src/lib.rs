//! Ordered route table for wayfinder.
//!
//! This crate compiles `{placeholder}` route patterns into anchored matchers
//! and keeps them in an ordered table keyed by HTTP method and pattern.
//!
//! # Features
//!
//! - **Placeholder Patterns**: `/users/{id}` captures one path segment per name
//! - **Case-Insensitive Paths**: literals compare case-insensitively, captures keep their casing
//! - **Exact Hits First**: placeholder-free routes are found by key before any scan
//! - **Ordered Scan**: among overlapping patterns the first registered wins
//! - **Legacy Keying**: optional mode that ignores the HTTP method
//!
//! # Example
//!
//! ```rust
//! use wayfinder_router::{RouteTable, TableMode};
//! use http::Method;
//!
//! let mut table = RouteTable::new(TableMode::MethodAware);
//! table.register(Method::GET, "/users", "listUsers").unwrap();
//! table.register(Method::GET, "/users/{id}", "getUser").unwrap();
//!
//! let found = table.lookup(&Method::GET, "/users/123").unwrap();
//! assert_eq!(*found.target(), "getUser");
//! assert_eq!(found.params().get("id"), Some("123"));
//!
//! assert!(table.lookup(&Method::GET, "/posts").is_none());
//! ```
//!
//! # Lookup
//!
//! ```text
//!   (method, path)
//!        │
//!        ▼
//!   key = "METHOD:lowercase(path)"
//!        │
//!   ┌────┴──────────────┐
//!   │ static route hit? │── yes ──▶ match, no captures
//!   └────┬──────────────┘
//!        │ no
//!        ▼
//!   scan routes in registration order
//!   (same method, pattern matches)
//!        │
//!        ▼
//!   first match or none
//! ```

mod error;
mod params;
mod pattern;
mod table;

pub use error::PatternError;
pub use params::Params;
pub use pattern::CompiledPattern;
pub use table::{Route, RouteMatch, RouteTable, TableMode};

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_basic_routing() {
        let mut table = RouteTable::new(TableMode::MethodAware);
        table.register(Method::GET, "/users", "listUsers").unwrap();
        table.register(Method::GET, "/users/{id}", "getUser").unwrap();

        let m = table.lookup(&Method::GET, "/users").unwrap();
        assert_eq!(*m.target(), "listUsers");
        assert!(m.params().is_empty());

        let m = table.lookup(&Method::GET, "/users/123").unwrap();
        assert_eq!(*m.target(), "getUser");
        assert_eq!(m.params().get("id"), Some("123"));
    }

    #[test]
    fn test_method_routing() {
        let mut table = RouteTable::new(TableMode::MethodAware);
        table.register(Method::GET, "/users", "listUsers").unwrap();
        table.register(Method::POST, "/users", "createUser").unwrap();

        assert_eq!(*table.lookup(&Method::GET, "/users").unwrap().target(), "listUsers");
        assert_eq!(*table.lookup(&Method::POST, "/users").unwrap().target(), "createUser");
        assert!(table.lookup(&Method::DELETE, "/users").is_none());
    }

    #[test]
    fn test_multiple_params() {
        let mut table = RouteTable::new(TableMode::MethodAware);
        table
            .register(Method::GET, "/orgs/{orgId}/users/{userId}", "getOrgUser")
            .unwrap();

        let m = table.lookup(&Method::GET, "/orgs/acme/users/123").unwrap();
        assert_eq!(*m.target(), "getOrgUser");
        assert_eq!(m.params().get("orgId"), Some("acme"));
        assert_eq!(m.params().get("userId"), Some("123"));
        assert_eq!(m.route().pattern().param_names(), ["orgId", "userId"]);
    }
}
