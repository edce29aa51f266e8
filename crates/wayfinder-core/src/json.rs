//! JSON encoding and the response envelope.
//!
//! Output is compact serde_json with one addition: `/` is written as `\/`, so
//! an encoded body can sit inside an HTML `<script>` block. The envelope's
//! keys are always `status`, `code`, `count` (list data only), `data`.

use std::io;

use http::StatusCode;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::ser::Formatter;

use crate::Value;

/// Compact output with `/` escaped.
#[derive(Debug, Clone, Copy, Default)]
struct SlashEscaping;

impl Formatter for SlashEscaping {
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut pieces = fragment.split('/');
        if let Some(first) = pieces.next() {
            writer.write_all(first.as_bytes())?;
        }
        for piece in pieces {
            writer.write_all(b"\\/")?;
            writer.write_all(piece.as_bytes())?;
        }
        Ok(())
    }
}

/// Encodes any serializable value as compact JSON with `/` escaped.
///
/// [`Value`] encodes non-finite floats as `null` and skips map entries with
/// an empty key.
///
/// # Errors
///
/// Whatever the value's `Serialize` impl reports; [`Value`] and
/// [`JsonEnvelope`] never fail.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut out = Vec::with_capacity(64);
    value.serialize(&mut serde_json::Serializer::with_formatter(&mut out, SlashEscaping))?;
    String::from_utf8(out).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

/// Escapes a string for inclusion between JSON quotes.
///
/// Backslash, quote and `/` are escaped, as are backspace, form feed, newline,
/// carriage return and tab. Other control characters use `\u00XX`.
///
/// # Errors
///
/// None in practice; the signature follows [`encode`].
///
/// # Example
///
/// ```
/// use wayfinder_core::json::escape;
///
/// assert_eq!(escape(r#"a\"b"#).unwrap(), r#"a\\\"b"#);
/// assert_eq!(escape("</a>").unwrap(), r"<\/a>");
/// ```
pub fn escape(input: &str) -> serde_json::Result<String> {
    let quoted = encode(input)?;
    Ok(quoted[1..quoted.len() - 1].to_string())
}

/// Envelope status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The handler succeeded.
    Success,
    /// The handler failed.
    Error,
}

impl EnvelopeStatus {
    /// Returns the wire string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// The JSON response envelope.
///
/// # Example
///
/// ```
/// use wayfinder_core::json::JsonEnvelope;
///
/// let envelope = JsonEnvelope::success(vec![1, 2, 3]);
/// assert_eq!(
///     envelope.to_json().unwrap(),
///     r#"{"status":"success","code":200,"count":3,"data":[1,2,3]}"#
/// );
///
/// let failed = JsonEnvelope::error("boom", 500);
/// assert_eq!(
///     failed.to_json().unwrap(),
///     r#"{"status":"error","code":500,"data":{"message":"boom"}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonEnvelope {
    status: EnvelopeStatus,
    code: u16,
    data: Value,
}

impl JsonEnvelope {
    /// Creates a success envelope with code 200.
    pub fn success(data: impl Into<Value>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            code: 200,
            data: data.into(),
        }
    }

    /// Creates an error envelope whose data is `{"message": message}`.
    pub fn error(message: impl Into<String>, code: u16) -> Self {
        let data: Value = [("message", Value::String(message.into()))]
            .into_iter()
            .collect();
        Self {
            status: EnvelopeStatus::Error,
            code,
            data,
        }
    }

    /// Overrides the code.
    #[must_use]
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> EnvelopeStatus {
        self.status
    }

    /// Returns the numeric code.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Returns the code as an HTTP status, falling back to 500 for codes
    /// outside the valid range.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns the data.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Returns the list length when data is a list.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        self.data.as_list().map(<[Value]>::len)
    }

    /// Encodes the envelope.
    ///
    /// # Errors
    ///
    /// See [`encode`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        encode(self)
    }
}

impl Serialize for JsonEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let count = self.count();
        let mut out = serializer.serialize_struct("JsonEnvelope", 3 + usize::from(count.is_some()))?;
        out.serialize_field("status", &self.status)?;
        out.serialize_field("code", &self.code)?;
        match count {
            Some(count) => out.serialize_field("count", &count)?,
            None => out.skip_field("count")?,
        }
        out.serialize_field("data", &self.data)?;
        out.end()
    }
}
