//! Error types for reviewdash.
//!
//! Every failure the API client can produce is normalized into [`Error`].
//! The orchestrator only ever surfaces [`Error::message`] to the user; the
//! variant is kept for diagnostics.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Generic message used when a rejected request carries no usable body.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced an HTTP response.
    Transport,
    /// The backend answered with a non-success status.
    BackendRejected,
    /// The backend answered with success but the body was unusable.
    MalformedResponse,
    /// A client-side precondition was not met.
    GuardRejected,
    /// A local file could not be read.
    Io,
    /// The client could not be configured.
    Configuration,
}

/// The main error type for reviewdash.
#[derive(Clone, Debug)]
pub enum Error {
    /// Network or connection failure, including timeouts.
    Transport {
        /// Human-readable error message.
        message: String,
        /// True when the failure was a timeout.
        timed_out: bool,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The backend rejected the request.
    BackendRejected {
        /// HTTP status code.
        status_code: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A success response that could not be decoded.
    MalformedResponse {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// A client-side precondition failed before any request was made.
    GuardRejected {
        /// Human-readable error message.
        message: String,
    },

    /// I/O error.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },

    /// Invalid configuration, such as an unusable base URL.
    Configuration {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new transport error.
    pub fn transport(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Transport {
            message: message.into(),
            timed_out: false,
            source: source.map(Arc::from),
        }
    }

    /// Creates a new transport error for a timed out request.
    pub fn timeout(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Transport {
            message: message.into(),
            timed_out: true,
            source: source.map(Arc::from),
        }
    }

    /// Creates a new backend rejection.
    pub fn backend_rejected(status_code: u16, message: impl Into<String>) -> Self {
        Error::BackendRejected {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a new malformed response error.
    pub fn malformed_response(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::MalformedResponse {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new guard rejection.
    pub fn guard_rejected(message: impl Into<String>) -> Self {
        Error::GuardRejected {
            message: message.into(),
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new configuration error.
    pub fn configuration(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Configuration {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } => ErrorKind::Transport,
            Error::BackendRejected { .. } => ErrorKind::BackendRejected,
            Error::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Error::GuardRejected { .. } => ErrorKind::GuardRejected,
            Error::Io { .. } => ErrorKind::Io,
            Error::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Returns the bare message, without the kind prefix used by `Display`.
    ///
    /// This is the string shown to the user when a submission fails.
    pub fn message(&self) -> &str {
        match self {
            Error::Transport { message, .. }
            | Error::BackendRejected { message, .. }
            | Error::MalformedResponse { message, .. }
            | Error::GuardRejected { message }
            | Error::Io { message, .. }
            | Error::Configuration { message, .. } => message,
        }
    }

    /// Returns true if the request never reached the backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Returns true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport { timed_out: true, .. })
    }

    /// Returns true if the backend rejected the request.
    pub fn is_backend_rejected(&self) -> bool {
        matches!(self, Error::BackendRejected { .. })
    }

    /// Returns true if a success response could not be decoded.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Error::MalformedResponse { .. })
    }

    /// Returns true if a client-side guard rejected the request.
    pub fn is_guard_rejected(&self) -> bool {
        matches!(self, Error::GuardRejected { .. })
    }

    /// Returns true if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }

    /// Returns the status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::BackendRejected { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport {
                message, timed_out, ..
            } => {
                if *timed_out {
                    write!(f, "Timeout error: {message}")
                } else {
                    write!(f, "Transport error: {message}")
                }
            }
            Error::BackendRejected {
                status_code,
                message,
            } => {
                write!(f, "Backend rejected request ({status_code}): {message}")
            }
            Error::MalformedResponse { message, .. } => {
                write!(f, "Malformed response: {message}")
            }
            Error::GuardRejected { message } => {
                write!(f, "Guard rejected: {message}")
            }
            Error::Io { message, .. } => {
                write!(f, "I/O error: {message}")
            }
            Error::Configuration { message, .. } => {
                write!(f, "Configuration error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Transport { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::MalformedResponse { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Io { source, .. } => Some(source),
            Error::Configuration { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::malformed_response(format!("JSON error: {err}"), Some(Box::new(err)))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("URL parse error: {err}"), Some(Box::new(err)))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::configuration(format!("YAML error: {err}"), Some(Box::new(err)))
    }
}

/// A specialized Result type for reviewdash operations.
pub type Result<T> = std::result::Result<T, Error>;
