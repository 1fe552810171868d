//! Error types returned by the filepicker client.
//!
//! Failures fall in three groups:
//! - service errors: the API answered with a non-2xx status, parsed into [`ServiceError`]
//! - transport errors: the request never completed (connection refused, timeout)
//! - local errors: file system problems, raised before or after the network round trip

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stable classification of a service error, compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidRequest,
    Unauthorized,
    FileNotFound,
    PayloadTooLarge,
    ServerError,
    Unknown,
}

impl ErrorKind {
    /// Maps a service `FPError` code to a kind.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            400 | 116 => Some(Self::InvalidRequest),
            401 | 403 | 111 | 113 => Some(Self::Unauthorized),
            404 | 115 => Some(Self::FileNotFound),
            413 | 117 => Some(Self::PayloadTooLarge),
            500..=599 | 112 | 114 => Some(Self::ServerError),
            _ => None,
        }
    }

    /// Kind implied by the HTTP status when the body carries no usable code.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest,
            401 | 403 => Self::Unauthorized,
            404 => Self::FileNotFound,
            413 => Self::PayloadTooLarge,
            s if (500..600).contains(&s) => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::Unauthorized => "access denied",
            Self::FileNotFound => "file not found",
            Self::PayloadTooLarge => "file too large",
            Self::ServerError => "internal service error",
            Self::Unknown => "unknown service error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Error reported by the service in a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub code: Option<u16>,
    pub message: String,
}

impl ServiceError {
    /// Parses a plain-text error body.
    ///
    /// Recognised forms are `FPError <code>: <text>`, `<code>: <text>` and
    /// free text. A known code wins over the HTTP status.
    pub fn parse(status: StatusCode, body: &str) -> Self {
        let message = body.trim().to_string();
        let code = leading_code(&message);
        let kind = code
            .and_then(ErrorKind::from_code)
            .unwrap_or_else(|| ErrorKind::from_status(status));
        Self {
            kind,
            status,
            code,
            message,
        }
    }
}

fn leading_code(message: &str) -> Option<u16> {
    let rest = message.strip_prefix("FPError").unwrap_or(message).trim_start();
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // "404 bytes missing" is text, "404" or "404: ..." is a code
    match rest[digits.len()..].chars().next() {
        None | Some(':') => digits.parse().ok(),
        _ => None,
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{} ({})", self.kind, self.status)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl std::error::Error for ServiceError {}

/// Errors that can occur during client operations
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Service error kind, if this error came from the service.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Service(e) => Some(e.kind),
            _ => None,
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }
}
