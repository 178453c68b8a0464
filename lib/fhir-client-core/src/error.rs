//! Error types for the FHIR client.
//!
//! Two families never mix:
//! - [`ServerError`] - the exchange completed but the server said no (status
//!   error) or the payload could not be decoded (decode error). Carried inside
//!   a [`crate::ServerResponse`].
//! - [`Error`] - the request never completed (connection, TLS, timeout,
//!   invalid URL). Returned on the `Err` side of a request future.

use derive_more::{Display, Error, From};

// ============================================================================
// Error Domain
// ============================================================================

/// Error domain shared by every [`ServerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorDomain {
    /// Errors derived from a completed server exchange.
    #[display("ServerError")]
    Server,
}

impl ErrorDomain {
    /// Stable string form, used by callers that pattern-match on the domain name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "ServerError",
        }
    }
}

// ============================================================================
// Server Error
// ============================================================================

/// Error derived from a completed exchange.
///
/// Shape: `{domain: "ServerError", code: <status>, message: <text>}`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ServerError {
    /// Synthesized from an HTTP status code >= 400.
    #[display("{message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Lowercase reason phrase, e.g. `not found`.
        message: String,
    },

    /// A payload was present but did not decode as a JSON object.
    #[display("{message}")]
    Decode {
        /// HTTP status code of the exchange.
        code: u16,
        /// Parser diagnostic followed by the payload as text.
        message: String,
        /// Message of the status error this one replaced, if any.
        status_message: Option<String>,
    },
}

impl ServerError {
    /// Derive a status error from an HTTP status code.
    #[must_use]
    pub fn status(code: u16) -> Self {
        Self::Status {
            code,
            message: reason_phrase(code),
        }
    }

    /// Build a decode error for `payload`.
    ///
    /// `superseded` is the error previously attached to the response; its
    /// message is retained in [`ServerError::status_message`].
    #[must_use]
    pub fn decode(
        code: u16,
        diagnostic: impl std::fmt::Display,
        payload: &[u8],
        superseded: Option<&Self>,
    ) -> Self {
        let message = format!(
            "failed to deserialize JSON into an object: {diagnostic}\n{}",
            String::from_utf8_lossy(payload)
        );
        Self::Decode {
            code,
            message,
            status_message: superseded.map(|err| err.message().to_string()),
        }
    }

    /// Error domain, always [`ErrorDomain::Server`].
    #[must_use]
    pub const fn domain(&self) -> ErrorDomain {
        ErrorDomain::Server
    }

    /// Structured code, equal to the HTTP status of the exchange.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Status { code, .. } | Self::Decode { code, .. } => *code,
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. } | Self::Decode { message, .. } => message,
        }
    }

    /// Message of the status error replaced by a decode failure.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        match self {
            Self::Decode { status_message, .. } => status_message.as_deref(),
            Self::Status { .. } => None,
        }
    }

    /// Returns `true` if the payload failed to decode.
    #[must_use]
    pub const fn is_decode_failure(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` if the code is 4xx.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.code())
    }

    /// Returns `true` if the code is 5xx.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.code())
    }

    /// Returns `true` if this is a 404 status error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { code: 404, .. })
    }
}

/// Lowercase standard reason phrase for `status`, or `server error <status>`.
#[must_use]
pub fn reason_phrase(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .map_or_else(|| format!("server error {status}"), str::to_lowercase)
}

// ============================================================================
// Transport Error
// ============================================================================

/// Error for requests that never produced a response.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "contact.name.family").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
