//! Binding failures.
//!
//! Binding fails only under the strict conversion policy. The error keeps
//! where the raw text came from so the transport can answer with a 400.

use std::fmt;

use http::StatusCode;
use thiserror::Error;

use crate::ConversionError;

/// Where the raw text for an argument was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionSource {
    /// A `{placeholder}` capture.
    Path,
    /// A query parameter, by explicit key or by the parameter's own name.
    Query,
    /// Nowhere.
    Absent,
}

impl ExtractionSource {
    /// Lower-case name used in messages and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A handler argument whose raw text does not convert to its declared type.
///
/// ```rust
/// use wayfinder_core::ParamType;
/// use wayfinder_extract::{convert, ExtractionError, ExtractionSource};
///
/// let cause = convert(Some("abc"), ParamType::Int).unwrap_err();
/// let err = ExtractionError::invalid_type(ExtractionSource::Path, "id", cause);
///
/// assert_eq!(err.origin(), ExtractionSource::Path);
/// assert_eq!(err.to_string(), "invalid path parameter 'id': cannot convert 'abc' to int: invalid digit found in string");
/// ```
#[derive(Debug, Error)]
#[error("invalid {origin} parameter '{field}': {cause}")]
pub struct ExtractionError {
    origin: ExtractionSource,
    field: String,
    #[source]
    cause: ConversionError,
}

impl ExtractionError {
    /// Wraps a conversion failure for the named parameter.
    #[must_use]
    pub fn invalid_type(
        origin: ExtractionSource,
        field: impl Into<String>,
        cause: ConversionError,
    ) -> Self {
        Self {
            origin,
            field: field.into(),
            cause,
        }
    }

    /// Where the offending text was read from.
    #[must_use]
    pub const fn origin(&self) -> ExtractionSource {
        self.origin
    }

    /// Handler parameter name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The underlying conversion failure.
    #[must_use]
    pub const fn cause(&self) -> &ConversionError {
        &self.cause
    }

    /// Always `400 Bad Request`.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
