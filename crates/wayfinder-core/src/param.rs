//! Handler parameter descriptors.

use std::fmt;

/// The declared type of a handler parameter.
///
/// The numeric variants keep the ranges of the types they stand for; a value
/// outside the range does not convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Text, bound verbatim.
    String,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 64-bit float.
    Double,
    /// 32-bit float.
    Float,
    /// `true` (any casing) is true, everything else is false.
    Boolean,
    /// 16-bit signed integer.
    Short,
    /// 8-bit signed integer.
    Byte,
    /// The [`RequestContext`](crate::RequestContext), injected directly.
    Context,
    /// A map of every query parameter, injected directly.
    QueryMap,
}

impl ParamType {
    /// Returns true for types that are injected rather than converted from a
    /// string.
    #[must_use]
    pub fn is_injected(self) -> bool {
        matches!(self, Self::Context | Self::QueryMap)
    }

    /// Returns the lowercase type name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Short => "short",
            Self::Byte => "byte",
            Self::Context => "context",
            Self::QueryMap => "query_map",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared handler parameter: its name, its type and an optional explicit
/// query key.
///
/// # Example
///
/// ```
/// use wayfinder_core::{ParamSpec, ParamType};
///
/// let page = ParamSpec::new("page", ParamType::Int).bind_query("p");
/// assert_eq!(page.name(), "page");
/// assert_eq!(page.query_key(), Some("p"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    name: String,
    ty: ParamType,
    query_key: Option<String>,
}

impl ParamSpec {
    /// Creates a parameter bound by name.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            query_key: None,
        }
    }

    /// Shorthand for a [`ParamType::String`] parameter.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::String)
    }

    /// Shorthand for a [`ParamType::Context`] parameter.
    #[must_use]
    pub fn context(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Context)
    }

    /// Shorthand for a [`ParamType::QueryMap`] parameter.
    #[must_use]
    pub fn query_map(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::QueryMap)
    }

    /// Binds the parameter to an explicitly named query parameter.
    ///
    /// A path capture with the parameter's own name still takes precedence.
    #[must_use]
    pub fn bind_query(mut self, key: impl Into<String>) -> Self {
        self.query_key = Some(key.into());
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    pub fn ty(&self) -> ParamType {
        self.ty
    }

    /// Returns the explicit query key, if one was declared.
    #[must_use]
    pub fn query_key(&self) -> Option<&str> {
        self.query_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injected_types() {
        assert!(ParamType::Context.is_injected());
        assert!(ParamType::QueryMap.is_injected());
        assert!(!ParamType::Long.is_injected());
    }

    #[test]
    fn test_param_spec_defaults() {
        let spec = ParamSpec::string("name");
        assert_eq!(spec.ty(), ParamType::String);
        assert_eq!(spec.query_key(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ParamType::QueryMap.to_string(), "query_map");
        assert_eq!(ParamType::Byte.to_string(), "byte");
    }
}
