//! Server response normalization.
//!
//! [`ServerResponse`] holds status and headers, and derives a [`ServerError`]
//! from a failing status. [`JsonServerResponse`] adds an optional decoded
//! JSON object body.
//!
//! # Example
//!
//! ```
//! use fhir_client_core::JsonServerResponse;
//!
//! let response = http::Response::builder().status(200).body(()).unwrap();
//! let response = JsonServerResponse::from_transport(&response, Some(br#"{"id":"42"}"#));
//!
//! assert!(response.error().is_none());
//! assert_eq!(response.body().unwrap()["id"], "42");
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::transport::{TransportResponse, string_headers};
use crate::{ServerError, from_json_value};

/// A decoded JSON object: string keys to arbitrary JSON values.
pub type JsonObject = serde_json::Map<String, Value>;

// ============================================================================
// Server Response
// ============================================================================

/// Status and headers of a completed exchange, plus the derived error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    status: u16,
    headers: HashMap<String, String>,
    error: Option<ServerError>,
}

impl ServerResponse {
    /// Creates a response, deriving a status error when `status >= 400`.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>) -> Self {
        let error = (status >= 400).then(|| ServerError::status(status));
        Self {
            status,
            headers,
            error,
        }
    }

    /// Creates a response carrying an explicit error instead of a derived one.
    #[must_use]
    pub fn with_error(status: u16, headers: HashMap<String, String>, error: ServerError) -> Self {
        Self {
            status,
            headers,
            error: Some(error),
        }
    }

    /// Creates a response from a raw transport response.
    ///
    /// Headers whose value is not a string are skipped.
    #[must_use]
    pub fn from_transport<T: TransportResponse + ?Sized>(transport: &T) -> Self {
        Self::new(
            transport.status_code(),
            string_headers(transport.header_map()),
        )
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }

    /// Error derived from the status, or supplied explicitly.
    #[must_use]
    pub const fn error(&self) -> Option<&ServerError> {
        self.error.as_ref()
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Consume into (status, headers, error).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, Option<ServerError>) {
        (self.status, self.headers, self.error)
    }
}

// ============================================================================
// JSON Server Response
// ============================================================================

/// How a [`JsonServerResponse`] ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<'a> {
    /// No payload was decoded. A status error may still be present.
    StatusOnly,
    /// The payload decoded as a JSON object.
    WithBody(&'a JsonObject),
    /// The payload was present but did not decode as a JSON object.
    DecodeFailed(&'a ServerError),
}

/// A [`ServerResponse`] with an optional JSON object body.
///
/// Check [`JsonServerResponse::error`] before reading the body. A 4xx/5xx
/// response may carry both an error and a body with server diagnostics
/// (e.g. a FHIR `OperationOutcome`).
#[derive(Debug, Clone, PartialEq)]
pub struct JsonServerResponse {
    response: ServerResponse,
    body: Option<JsonObject>,
}

impl JsonServerResponse {
    /// Creates a response without body.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>) -> Self {
        Self {
            response: ServerResponse::new(status, headers),
            body: None,
        }
    }

    /// Creates a response from a raw transport response and its payload.
    #[must_use]
    pub fn from_transport<T: TransportResponse + ?Sized>(
        transport: &T,
        payload: Option<&[u8]>,
    ) -> Self {
        Self::from_response(ServerResponse::from_transport(transport), payload)
    }

    /// Attach a payload to an existing response.
    ///
    /// An absent or empty payload leaves the body empty. A payload that is not
    /// a JSON object replaces any error with a decode error.
    #[must_use]
    pub fn from_response(mut response: ServerResponse, payload: Option<&[u8]>) -> Self {
        let mut body = None;

        if let Some(payload) = payload.filter(|payload| !payload.is_empty()) {
            match serde_json::from_slice::<JsonObject>(payload) {
                Ok(object) => body = Some(object),
                Err(err) => {
                    let decode =
                        ServerError::decode(response.status, &err, payload, response.error());
                    response.error = Some(decode);
                }
            }
        }

        Self { response, body }
    }

    /// The underlying status/headers response.
    #[must_use]
    pub const fn response(&self) -> &ServerResponse {
        &self.response
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.response.status()
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        self.response.headers()
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.response.header(name)
    }

    /// Status error or decode error.
    #[must_use]
    pub const fn error(&self) -> Option<&ServerError> {
        self.response.error()
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.response.is_success()
    }

    /// Decoded JSON object body.
    #[must_use]
    pub const fn body(&self) -> Option<&JsonObject> {
        self.body.as_ref()
    }

    /// Tagged view of the response.
    #[must_use]
    pub fn outcome(&self) -> Outcome<'_> {
        match (self.error(), &self.body) {
            (Some(err), _) if err.is_decode_failure() => Outcome::DecodeFailed(err),
            (_, Some(body)) => Outcome::WithBody(body),
            _ => Outcome::StatusOnly,
        }
    }

    /// Deserialize the body into a typed value.
    ///
    /// Returns `None` when there is no body.
    ///
    /// # Errors
    ///
    /// The inner result fails when the body does not match `T`; the error
    /// names the offending path.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Option<crate::Result<T>> {
        self.body
            .as_ref()
            .map(|body| from_json_value(Value::Object(body.clone())))
    }

    /// Error first, then body.
    ///
    /// # Errors
    ///
    /// Returns the status or decode error when one is set.
    pub fn into_result(self) -> Result<Option<JsonObject>, ServerError> {
        match self.response.error {
            Some(err) => Err(err),
            None => Ok(self.body),
        }
    }

    /// Consume into the base response and body.
    #[must_use]
    pub fn into_parts(self) -> (ServerResponse, Option<JsonObject>) {
        (self.response, self.body)
    }
}
