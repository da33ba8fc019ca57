//! Error type shared by every layer of the ASG.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type AsgResult<T> = Result<T, AsgError>;

/// Errors raised by graph operations.
///
/// Every variant records the operation it originated from (`location`) and a
/// human-readable message. They signal integrity or programming errors and are
/// never retried automatically.
#[derive(Debug, Error)]
pub enum AsgError {
    /// Operation on an exhausted or invalid cursor.
    #[error("{location}: invalid iterator: {message}")]
    InvalidIterator {
        location: &'static str,
        message: String,
        #[source]
        cause: Option<Box<AsgError>>,
    },

    /// Operation invoked while the object's state forbids it.
    #[error("{location}: illegal state: {message}")]
    IllegalState {
        location: &'static str,
        message: String,
        #[source]
        cause: Option<Box<AsgError>>,
    },

    /// Advancing past the end of an iteration or looking up a missing element.
    #[error("{location}: no such element: {message}")]
    NoSuchElement {
        location: &'static str,
        message: String,
        #[source]
        cause: Option<Box<AsgError>>,
    },

    /// Save or load failure. The source is either the failing
    /// `std::io::Error` or the graph error that made the stream unusable.
    #[error("{location}: I/O error: {message}")]
    Io {
        location: &'static str,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AsgError {
    /// Create an invalid iterator error.
    pub fn invalid_iterator(location: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidIterator {
            location,
            message: message.into(),
            cause: None,
        }
    }

    /// Create an illegal state error.
    pub fn illegal_state(location: &'static str, message: impl Into<String>) -> Self {
        Self::IllegalState {
            location,
            message: message.into(),
            cause: None,
        }
    }

    /// Create a no such element error.
    pub fn no_such_element(location: &'static str, message: impl Into<String>) -> Self {
        Self::NoSuchElement {
            location,
            message: message.into(),
            cause: None,
        }
    }

    /// Create an I/O error without an underlying cause (format problems).
    pub fn io(location: &'static str, message: impl Into<String>) -> Self {
        Self::Io {
            location,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a `std::io::Error`.
    pub fn from_io(location: &'static str, source: std::io::Error) -> Self {
        Self::Io {
            location,
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Attach an inner cause, replacing any previous one.
    pub fn with_cause(mut self, inner: AsgError) -> Self {
        match &mut self {
            Self::InvalidIterator { cause, .. }
            | Self::IllegalState { cause, .. }
            | Self::NoSuchElement { cause, .. } => *cause = Some(Box::new(inner)),
            Self::Io { source, .. } => *source = Some(Box::new(inner)),
        }
        self
    }

    /// The operation this error originated from.
    pub fn location(&self) -> &'static str {
        match self {
            Self::InvalidIterator { location, .. }
            | Self::IllegalState { location, .. }
            | Self::NoSuchElement { location, .. }
            | Self::Io { location, .. } => *location,
        }
    }

    /// The error message without the location prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidIterator { message, .. }
            | Self::IllegalState { message, .. }
            | Self::NoSuchElement { message, .. }
            | Self::Io { message, .. } => message,
        }
    }
}
