//! Response normalization.
//!
//! Turns an [`InvocationResult`] into what the transport writes back:
//!
//! | Result | JSON route | Other route |
//! |--------|------------|-------------|
//! | plain value | success envelope | display string |
//! | view | success envelope of the model | view name and model |
//! | prebuilt envelope | emitted verbatim | emitted verbatim |
//! | failure | error envelope, code 500 | `error: <message>` |
//!
//! A view's model becomes envelope data as follows: an empty model is `null`,
//! a single entry is unwrapped to its value, anything else is the model map.

use http::StatusCode;
use wayfinder_core::json::JsonEnvelope;
use wayfinder_core::{InvocationResult, ModelView, RequestContext, Value};
use wayfinder_extract::ExtractionError;

/// The normalized response.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// A plain-text body.
    Text(String),
    /// No route matched; an informational body.
    NoRoute(String),
    /// A plain-text error body.
    Error {
        /// Suggested status.
        status: StatusCode,
        /// The body, `error: <message>`.
        message: String,
    },
    /// A view for the external renderer. The model is meant to be copied
    /// into request-scoped state before rendering.
    View(ModelView),
    /// An encoded JSON envelope.
    Json {
        /// Status taken from the envelope code.
        status: StatusCode,
        /// The encoded envelope.
        body: String,
    },
}

impl Rendered {
    /// Returns the suggested HTTP status.
    ///
    /// Text, views and the no-route message use 200; the transport may pick
    /// something else.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Error { status, .. } | Self::Json { status, .. } => *status,
            Self::Text(_) | Self::NoRoute(_) | Self::View(_) => StatusCode::OK,
        }
    }

    /// Returns the body, if this is not a view.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Text(body) | Self::NoRoute(body) => Some(body),
            Self::Error { message, .. } => Some(message),
            Self::Json { body, .. } => Some(body),
            Self::View(_) => None,
        }
    }

    /// Returns true for a JSON body.
    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json { .. })
    }
}

/// Maps invocation results to responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Normalizes a handler result.
    ///
    /// # Example
    ///
    /// ```
    /// use wayfinder::{InvocationResult, ModelView, Rendered, ResponseNormalizer};
    ///
    /// let view = ModelView::new("greeting").add("x", "ok");
    /// let rendered = ResponseNormalizer::normalize(InvocationResult::View(view), true);
    ///
    /// assert_eq!(
    ///     rendered.body(),
    ///     Some(r#"{"status":"success","code":200,"data":"ok"}"#)
    /// );
    /// ```
    #[must_use]
    pub fn normalize(result: InvocationResult, wants_json: bool) -> Rendered {
        match result {
            InvocationResult::Envelope(envelope) => json(&envelope),
            InvocationResult::Plain(value) if wants_json => json(&JsonEnvelope::success(value)),
            InvocationResult::View(view) if wants_json => {
                json(&JsonEnvelope::success(model_data(view)))
            }
            InvocationResult::Failure { message, .. } if wants_json => json(&JsonEnvelope::error(
                message,
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            )),
            InvocationResult::Plain(value) => Rendered::Text(value.to_string()),
            InvocationResult::View(view) => Rendered::View(view),
            InvocationResult::Failure { message, .. } => Rendered::Error {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("error: {message}"),
            },
        }
    }

    /// The informational response for a request no route matched.
    #[must_use]
    pub fn no_route(ctx: &RequestContext) -> Rendered {
        Rendered::NoRoute(format!(
            "no route matched for {} {}",
            ctx.method(),
            ctx.path()
        ))
    }

    /// The response for an argument rejected under strict binding.
    #[must_use]
    pub fn bad_request(err: &ExtractionError, wants_json: bool) -> Rendered {
        let status = err.status_code();
        if wants_json {
            json(&JsonEnvelope::error(err.to_string(), status.as_u16()))
        } else {
            Rendered::Error {
                status,
                message: format!("error: {err}"),
            }
        }
    }
}

fn json(envelope: &JsonEnvelope) -> Rendered {
    match envelope.to_json() {
        Ok(body) => Rendered::Json {
            status: envelope.status_code(),
            body,
        },
        Err(e) => {
            tracing::error!(error = %e, "cannot encode response envelope");
            Rendered::Error {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("error: cannot encode response: {e}"),
            }
        }
    }
}

fn model_data(view: ModelView) -> Value {
    let (_, model) = view.into_parts();
    match model.len() {
        0 => Value::Null,
        1 => model.into_iter().next().map_or(Value::Null, |(_, value)| value),
        _ => Value::Map(model),
    }
}
