//! Handler functions and their bound arguments.
//!
//! Handlers are registered as closures rather than discovered at runtime. A
//! [`HandlerFn`] is a type-erased, shareable function from
//! [`BoundArguments`] to an [`Outcome`].

use std::fmt;
use std::sync::Arc;

use crate::{HandlerError, Outcome, RequestContext, Value};

/// A single bound argument.
#[derive(Debug, Clone)]
pub enum Argument {
    /// A converted value, or [`Value::Null`] when absent.
    Value(Value),
    /// The injected request context.
    Context(RequestContext),
}

impl Argument {
    /// Returns the value, or `None` for an injected context.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Context(_) => None,
        }
    }
}

/// The per-invocation arguments, one per declared parameter, in declaration
/// order.
///
/// # Example
///
/// ```
/// use wayfinder_core::{Argument, BoundArguments, Value};
///
/// let mut args = BoundArguments::new();
/// args.push("id", Argument::Value(Value::Int(7)));
/// args.push("q", Argument::Value(Value::Null));
///
/// assert_eq!(args.get("id").as_i64(), Some(7));
/// assert!(args.get("q").is_null());
/// assert!(args.get("unknown").is_null());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoundArguments {
    entries: Vec<(String, Argument)>,
}

impl BoundArguments {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` arguments.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends an argument.
    pub fn push(&mut self, name: impl Into<String>, argument: Argument) {
        self.entries.push((name.into(), argument));
    }

    /// Returns the value bound to a parameter name.
    ///
    /// Unknown names, injected contexts and absent values all read as
    /// [`Value::Null`].
    #[must_use]
    pub fn get(&self, name: &str) -> &Value {
        self.argument(name)
            .and_then(Argument::as_value)
            .unwrap_or(Value::null_ref())
    }

    /// Returns the value at a position, [`Value::Null`] if out of range.
    #[must_use]
    pub fn at(&self, index: usize) -> &Value {
        self.entries
            .get(index)
            .and_then(|(_, arg)| arg.as_value())
            .unwrap_or(Value::null_ref())
    }

    /// Returns the raw argument for a parameter name.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, arg)| arg)
    }

    /// Returns the first injected request context.
    #[must_use]
    pub fn context(&self) -> Option<&RequestContext> {
        self.entries.iter().find_map(|(_, arg)| match arg {
            Argument::Context(ctx) => Some(ctx),
            Argument::Value(_) => None,
        })
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, argument)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}

/// A stateless owner of handler methods.
///
/// Routes created with [`HandlerFn::per_call`] build a fresh controller for
/// every request; nothing is shared between calls.
pub trait Controller: Sized + 'static {
    /// Creates an instance for one call.
    fn instantiate() -> Result<Self, HandlerError>;
}

type ErasedHandler = Arc<dyn Fn(&BoundArguments) -> Result<Outcome, HandlerError> + Send + Sync>;

/// A type-erased handler function.
///
/// Cloning is cheap; clones share the same function.
///
/// # Example
///
/// ```
/// use wayfinder_core::{BoundArguments, HandlerFn, Outcome};
///
/// let handler = HandlerFn::new(|args: &BoundArguments| {
///     Ok(format!("hello {}", args.get("name")))
/// });
///
/// let outcome = handler.call(&BoundArguments::new()).unwrap();
/// assert_eq!(outcome, Outcome::from("hello null"));
/// ```
#[derive(Clone)]
pub struct HandlerFn {
    inner: ErasedHandler,
}

impl HandlerFn {
    /// Wraps a closure.
    pub fn new<F, R>(func: F) -> Self
    where
        F: Fn(&BoundArguments) -> Result<R, HandlerError> + Send + Sync + 'static,
        R: Into<Outcome>,
    {
        Self {
            inner: Arc::new(move |args: &BoundArguments| func(args).map(Into::into)),
        }
    }

    /// Wraps a controller method. A new controller is instantiated for
    /// every call.
    pub fn per_call<C, F, R>(method: F) -> Self
    where
        C: Controller,
        F: Fn(&mut C, &BoundArguments) -> Result<R, HandlerError> + Send + Sync + 'static,
        R: Into<Outcome>,
    {
        Self::new(move |args: &BoundArguments| {
            let mut controller = C::instantiate()?;
            method(&mut controller, args)
        })
    }

    /// Calls the handler.
    pub fn call(&self, args: &BoundArguments) -> Result<Outcome, HandlerError> {
        (self.inner)(args)
    }
}

impl fmt::Debug for HandlerFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}
