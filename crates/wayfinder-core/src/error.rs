//! Handler failure types.

use thiserror::Error;

/// Boxed error cause carried by [`HandlerError::Execution`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for handler bodies.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// A failure raised while creating a controller or running a handler.
///
/// The invoker turns every `HandlerError` into a failure result; it is never
/// returned to the transport as an error.
///
/// # Example
///
/// ```
/// use wayfinder_core::HandlerError;
///
/// let err = HandlerError::execution("user 7 not found");
/// assert_eq!(err.to_string(), "user 7 not found");
///
/// let err: HandlerError = anyhow::anyhow!("db down").into();
/// assert_eq!(err.to_string(), "db down");
/// ```
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The controller could not be created.
    #[error("failed to instantiate {controller}: {message}")]
    Instantiation {
        /// Controller type name.
        controller: String,
        /// Failure description.
        message: String,
    },

    /// The handler returned an error.
    #[error("{message}")]
    Execution {
        /// Failure description.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// The handler panicked.
    #[error("handler panicked: {message}")]
    Panicked {
        /// The panic payload, if it was a string.
        message: String,
    },
}

impl HandlerError {
    /// Creates an execution error with no cause.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an execution error wrapping a cause.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Execution {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an instantiation error.
    pub fn instantiation(controller: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Instantiation {
            controller: controller.into(),
            message: message.into(),
        }
    }

    /// Returns a short category label for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Instantiation { .. } => "instantiation",
            Self::Execution { .. } => "execution",
            Self::Panicked { .. } => "panic",
        }
    }
}

impl From<anyhow::Error> for HandlerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Execution {
            message: err.to_string(),
            source: Some(err.into()),
        }
    }
}
