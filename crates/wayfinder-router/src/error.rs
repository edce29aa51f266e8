//! Pattern compilation errors.

use thiserror::Error;

/// A route pattern that cannot be compiled into a matcher.
///
/// Patterns are checked when a route is registered, so a malformed pattern
/// fails the table build instead of silently never matching.
///
/// # Example
///
/// ```rust
/// use wayfinder_router::{CompiledPattern, PatternError};
///
/// let err = CompiledPattern::compile("/users/{id").unwrap_err();
/// assert!(matches!(err, PatternError::Unclosed { position: 7, .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `{` without a matching `}` in the same path segment.
    #[error("unclosed placeholder at byte {position} in pattern '{pattern}'")]
    Unclosed {
        /// The offending pattern.
        pattern: String,
        /// Byte offset of the opening brace.
        position: usize,
    },

    /// A `}` that does not close a placeholder.
    #[error("unexpected '}}' at byte {position} in pattern '{pattern}'")]
    Unopened {
        /// The offending pattern.
        pattern: String,
        /// Byte offset of the closing brace.
        position: usize,
    },

    /// A `{` inside another placeholder.
    #[error("nested placeholder at byte {position} in pattern '{pattern}'")]
    Nested {
        /// The offending pattern.
        pattern: String,
        /// Byte offset of the inner brace.
        position: usize,
    },

    /// `{}` with no name.
    #[error("empty placeholder name at byte {position} in pattern '{pattern}'")]
    EmptyName {
        /// The offending pattern.
        pattern: String,
        /// Byte offset of the opening brace.
        position: usize,
    },

    /// The same placeholder name used twice.
    #[error("duplicate placeholder '{name}' in pattern '{pattern}'")]
    DuplicateName {
        /// The offending pattern.
        pattern: String,
        /// The repeated name.
        name: String,
    },

    /// The generated expression was rejected by the regex engine.
    #[error("invalid pattern '{pattern}': {reason}")]
    Invalid {
        /// The offending pattern.
        pattern: String,
        /// Message from the regex engine.
        reason: String,
    },
}

impl PatternError {
    /// Returns the pattern that failed to compile.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Unclosed { pattern, .. }
            | Self::Unopened { pattern, .. }
            | Self::Nested { pattern, .. }
            | Self::EmptyName { pattern, .. }
            | Self::DuplicateName { pattern, .. }
            | Self::Invalid { pattern, .. } => pattern,
        }
    }
}
