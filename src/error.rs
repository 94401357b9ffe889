//! Error handling for the GroupMe REST adapter
//!
//! Every failure surfaced by an operation is an [`Error`]. The [`ErrorCode`]
//! tells callers which layer failed: the network, the response stream, the
//! service itself, or the shape of the body.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::serde_helpers::null_as_default;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Display text used when the service gives no reason, and for bodies of
/// unrecognized shape
pub const UNEXPECTED_RESPONSE: &str = "unexpected response";

/// Separator placed between the messages of a service error
const MESSAGE_SEPARATOR: &str = " + ";

/// Error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Generic/unknown error
    Unknown,
    /// Invalid argument provided
    InvalidArgument,
    /// The request never produced a response (connect, DNS, TLS, timeout)
    NetworkError,
    /// The response arrived but its body could not be read in full
    ReadError,
    /// The service answered with its own error envelope
    ServiceError,
    /// The body matched neither the success nor the error shape
    UnrecognizedResponse,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::InvalidArgument => "Invalid argument",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::ReadError => "Response read error",
            ErrorCode::ServiceError => "Service error",
            ErrorCode::UnrecognizedResponse => "Unrecognized response",
        }
    }
}

/// Metadata block of a GroupMe error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
}

/// Error envelope returned by the GroupMe API
///
/// `{"meta": {"code": 400, "errors": ["..."]}}`. The `meta` block may be
/// missing or null, in which case the display text is [`UNEXPECTED_RESPONSE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl ServiceError {
    /// Numeric code reported by the service, if any
    pub fn code(&self) -> Option<i64> {
        self.meta.as_ref().map(|m| m.code)
    }

    /// Human-readable reasons, in the order the service sent them
    pub fn messages(&self) -> &[String] {
        self.meta.as_ref().map(|m| m.errors.as_slice()).unwrap_or(&[])
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.meta {
            Some(meta) => f.write_str(&meta.errors.join(MESSAGE_SEPARATOR)),
            None => f.write_str(UNEXPECTED_RESPONSE),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Library error type
#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    /// Envelope decoded from the body when `code` is `ServiceError`
    pub(crate) service: Option<ServiceError>,
    /// HTTP status code if this error came from an HTTP response
    pub(crate) http_status: Option<u16>,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Error {
            code,
            message: message.into(),
            service: None,
            http_status: None,
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::InvalidArgument, msg)
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::NetworkError, msg)
    }

    pub fn read(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::ReadError, msg)
    }

    /// The marker for a body that is neither a success payload nor an error envelope
    pub fn unrecognized_response() -> Self {
        Error::new(ErrorCode::UnrecognizedResponse, UNEXPECTED_RESPONSE)
    }

    /// Add HTTP status code (builder pattern)
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Get the HTTP status code if available
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// Get the service envelope if the service reported this error
    pub fn service_error(&self) -> Option<&ServiceError> {
        self.service.as_ref()
    }

    /// Network-level failure; whether to retry depends on the cause
    pub fn is_transport(&self) -> bool {
        matches!(self.code, ErrorCode::NetworkError | ErrorCode::ReadError)
    }

    pub fn is_service(&self) -> bool {
        self.code == ErrorCode::ServiceError
    }

    pub fn is_unrecognized(&self) -> bool {
        self.code == ErrorCode::UnrecognizedResponse
    }
}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        Error {
            code: ErrorCode::ServiceError,
            message: err.to_string(),
            service: Some(err),
            http_status: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            ErrorCode::ServiceError | ErrorCode::UnrecognizedResponse => f.write_str(&self.message),
            _ => write!(f, "{}: {}", self.code.as_str(), self.message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.service
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
