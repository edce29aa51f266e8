//! Handler outcomes and invocation results.

use indexmap::IndexMap;

use crate::json::JsonEnvelope;
use crate::{HandlerError, Value};

/// A named view plus the model to render it with.
///
/// Rendering is left to the caller; the model is kept in insertion order so
/// it can be copied into request-scoped state as-is.
///
/// # Example
///
/// ```
/// use wayfinder_core::ModelView;
///
/// let view = ModelView::new("user/show")
///     .add("id", 7)
///     .add("name", "ada");
///
/// assert_eq!(view.view(), "user/show");
/// assert_eq!(view.get("name").and_then(|v| v.as_str()), Some("ada"));
/// assert_eq!(view.attributes().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelView {
    view: String,
    model: IndexMap<String, Value>,
}

impl ModelView {
    /// Creates a view with an empty model.
    #[must_use]
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            model: IndexMap::new(),
        }
    }

    /// Adds a model entry. A repeated key keeps its first position.
    #[must_use]
    pub fn add(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a model entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.model.insert(key.into(), value.into());
    }

    /// Returns the view name.
    #[must_use]
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Returns a model entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.model.get(key)
    }

    /// Returns the model.
    #[must_use]
    pub fn model(&self) -> &IndexMap<String, Value> {
        &self.model
    }

    /// Iterates model entries in insertion order, for export into
    /// request-scoped attributes.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.model.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if the model has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// Returns the number of model entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.model.len()
    }

    /// Splits into view name and model.
    #[must_use]
    pub fn into_parts(self) -> (String, IndexMap<String, Value>) {
        (self.view, self.model)
    }
}

/// What a handler returns on success.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A plain value.
    Value(Value),
    /// A view to render.
    View(ModelView),
    /// A prebuilt JSON envelope, emitted verbatim.
    Envelope(JsonEnvelope),
}

impl From<Value> for Outcome {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<ModelView> for Outcome {
    fn from(v: ModelView) -> Self {
        Self::View(v)
    }
}

impl From<JsonEnvelope> for Outcome {
    fn from(v: JsonEnvelope) -> Self {
        Self::Envelope(v)
    }
}

impl From<String> for Outcome {
    fn from(v: String) -> Self {
        Self::Value(Value::String(v))
    }
}

impl From<&str> for Outcome {
    fn from(v: &str) -> Self {
        Self::Value(Value::from(v))
    }
}

impl From<i64> for Outcome {
    fn from(v: i64) -> Self {
        Self::Value(Value::Int(v))
    }
}

impl From<bool> for Outcome {
    fn from(v: bool) -> Self {
        Self::Value(Value::Bool(v))
    }
}

impl From<Vec<Value>> for Outcome {
    fn from(v: Vec<Value>) -> Self {
        Self::Value(Value::List(v))
    }
}

impl From<()> for Outcome {
    fn from((): ()) -> Self {
        Self::Value(Value::Null)
    }
}

/// The result of one invocation, consumed once by the normalizer.
#[derive(Debug)]
pub enum InvocationResult {
    /// The handler returned a plain value.
    Plain(Value),
    /// The handler returned a view.
    View(ModelView),
    /// The handler returned a prebuilt envelope.
    Envelope(JsonEnvelope),
    /// Instantiation or execution failed.
    Failure {
        /// Message surfaced to the client.
        message: String,
        /// The underlying error.
        cause: HandlerError,
    },
}

impl InvocationResult {
    /// Wraps a handler error.
    #[must_use]
    pub fn failure(cause: HandlerError) -> Self {
        Self::Failure {
            message: cause.to_string(),
            cause,
        }
    }

    /// Returns true for [`InvocationResult::Failure`].
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Returns a short label for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain(_) => "plain",
            Self::View(_) => "view",
            Self::Envelope(_) => "envelope",
            Self::Failure { .. } => "failure",
        }
    }
}

impl From<Outcome> for InvocationResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Value(v) => Self::Plain(v),
            Outcome::View(v) => Self::View(v),
            Outcome::Envelope(e) => Self::Envelope(e),
        }
    }
}

impl From<Result<Outcome, HandlerError>> for InvocationResult {
    fn from(result: Result<Outcome, HandlerError>) -> Self {
        result.map_or_else(Self::failure, Self::from)
    }
}
