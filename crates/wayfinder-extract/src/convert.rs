//! String to typed value conversion.
//!
//! Path captures and query parameters arrive as text; each declared handler
//! parameter converts that text to its [`ParamType`].

use std::fmt;

use thiserror::Error;
use wayfinder_core::{ParamType, Value};

/// What to do when a raw string does not convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionPolicy {
    /// Bind [`Value::Null`] and log a warning.
    #[default]
    Lenient,
    /// Fail the request with a 400-class error.
    Strict,
}

impl ConversionPolicy {
    /// Returns the configuration name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for ConversionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw string that does not convert to the declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert '{raw}' to {ty}: {reason}")]
pub struct ConversionError {
    /// Target type.
    pub ty: ParamType,
    /// The offending input.
    pub raw: String,
    /// Parser message.
    pub reason: String,
}

impl ConversionError {
    fn new(ty: ParamType, raw: &str, reason: impl fmt::Display) -> Self {
        Self {
            ty,
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Converts a raw string to a declared type.
///
/// An absent input converts to [`Value::Null`] for every type. Booleans never
/// fail: `true` in any casing is true, anything else is false. Integer types
/// are range-checked against their width.
///
/// # Example
///
/// ```
/// use wayfinder_core::{ParamType, Value};
/// use wayfinder_extract::convert;
///
/// assert_eq!(convert(Some("42"), ParamType::Int), Ok(Value::Int(42)));
/// assert_eq!(convert(Some("TRUE"), ParamType::Boolean), Ok(Value::Bool(true)));
/// assert_eq!(convert(None, ParamType::Long), Ok(Value::Null));
/// assert!(convert(Some("300"), ParamType::Byte).is_err());
/// ```
pub fn convert(raw: Option<&str>, ty: ParamType) -> Result<Value, ConversionError> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };

    match ty {
        ParamType::String => Ok(Value::from(raw)),
        ParamType::Boolean => Ok(Value::Bool(raw.eq_ignore_ascii_case("true"))),
        ParamType::Byte => raw
            .parse::<i8>()
            .map(Value::from)
            .map_err(|e| ConversionError::new(ty, raw, e)),
        ParamType::Short => raw
            .parse::<i16>()
            .map(Value::from)
            .map_err(|e| ConversionError::new(ty, raw, e)),
        ParamType::Int => raw
            .parse::<i32>()
            .map(Value::from)
            .map_err(|e| ConversionError::new(ty, raw, e)),
        ParamType::Long => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| ConversionError::new(ty, raw, e)),
        ParamType::Float => raw
            .parse::<f32>()
            .map(Value::from)
            .map_err(|e| ConversionError::new(ty, raw, e)),
        ParamType::Double => raw
            .parse::<f64>()
            .map(Value::from)
            .map_err(|e| ConversionError::new(ty, raw, e)),
        ParamType::Context | ParamType::QueryMap => Err(ConversionError::new(
            ty,
            raw,
            "injected types are not converted from text",
        )),
    }
}
