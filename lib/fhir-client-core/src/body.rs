//! Body serialization utilities.

use bytes::Bytes;
use serde_json::Value;

use crate::Result;

/// Content type for request and response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Generic JSON (`application/json`).
    Json,
    /// FHIR JSON (`application/fhir+json`).
    FhirJson,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FhirJson => "application/fhir+json",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use fhir_client_core::to_json;
/// use serde_json::json;
///
/// let bytes = to_json(&json!({"resourceType": "Patient"})).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"resourceType":"Patient"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize an already-parsed JSON value, with path-aware error messages.
///
/// # Errors
///
/// Returns an error if `value` does not match `T`.
pub fn from_json_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
