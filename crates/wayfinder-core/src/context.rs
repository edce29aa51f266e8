//! Request context types.
//!
//! The [`RequestContext`] carries the already-parsed request facts into the
//! router and can be injected into handlers that ask for it.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use http::method::InvalidMethod;
use http::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::QueryParams;

/// Correlates the log events of one dispatch.
///
/// Fresh ids are UUID v7, so they sort by creation time. A transport that
/// already carries an id (say, in an `x-request-id` header) can parse it
/// instead.
///
/// ```
/// use wayfinder_core::RequestId;
///
/// let id: RequestId = "01932c07-a8b8-7a4e-9d2f-3a1c5e0b7f10".parse().unwrap();
/// assert_eq!(id.to_string(), "01932c07-a8b8-7a4e-9d2f-3a1c5e0b7f10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// A new time-ordered id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wraps an id minted elsewhere.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The wrapped UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Per-request facts handed to the dispatcher by the transport.
///
/// Handlers that declare a context parameter receive a clone of this value.
///
/// # Example
///
/// ```
/// use wayfinder_core::{QueryParams, RequestContext};
/// use http::Method;
///
/// let ctx = RequestContext::new(Method::GET, "/users/7")
///     .with_query(QueryParams::parse("verbose=true").unwrap());
///
/// assert_eq!(ctx.method(), &Method::GET);
/// assert_eq!(ctx.path(), "/users/7");
/// assert_eq!(ctx.query().get("verbose"), Some("true"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    method: Method,
    path: String,
    query: QueryParams,
    started_at: Instant,
}

impl RequestContext {
    /// Creates a context with a fresh request ID and no query parameters.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            query: QueryParams::new(),
            started_at: Instant::now(),
        }
    }

    /// Creates a context from a raw method string.
    ///
    /// Methods are case-insensitive: `get` and `GET` are the same request.
    pub fn from_raw(method: &str, path: impl Into<String>) -> Result<Self, InvalidMethod> {
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
        Ok(Self::new(method, path))
    }

    /// Creates a `GET /` context for tests.
    #[must_use]
    pub fn mock() -> Self {
        Self::new(Method::GET, "/")
    }

    /// Returns a new context with the given query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Returns a new context with the given request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns the request ID.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters.
    #[must_use]
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Returns the elapsed time since the context was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::mock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_v7() {
        let first = RequestId::new();
        let second = RequestId::new();
        assert_ne!(first, second);
        assert_eq!(first.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_parse_transport_id() {
        let raw = " 01932c07-a8b8-7a4e-9d2f-3a1c5e0b7f10 ";
        let id: RequestId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw.trim());
        assert!("not-an-id".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = RequestId::from(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""00000000-0000-0000-0000-000000000000""#);
        assert_eq!(serde_json::from_str::<RequestId>(&json).unwrap(), id);
    }

    #[test]
    fn test_from_raw_uppercases_method() {
        let ctx = RequestContext::from_raw("delete", "/users/1").unwrap();
        assert_eq!(ctx.method(), &Method::DELETE);
        assert_eq!(ctx.path(), "/users/1");
    }

    #[test]
    fn test_from_raw_rejects_invalid_method() {
        assert!(RequestContext::from_raw("GE T", "/").is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let id = RequestId::new();
        let ctx = RequestContext::mock()
            .with_request_id(id)
            .with_query(QueryParams::new().with("a", "1"));

        assert_eq!(ctx.request_id(), id);
        assert_eq!(ctx.query().get("a"), Some("1"));
    }
}
