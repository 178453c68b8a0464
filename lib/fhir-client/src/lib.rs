//! Async FHIR REST client.
//!
//! [`RestServer`] binds an HTTP transport to a server base URL and implements
//! [`FhirServer`]. Every completed exchange comes back as a
//! [`JsonServerResponse`]; only requests that never completed return an
//! [`Error`].
//!
//! # Example
//!
//! ```ignore
//! use fhir_client::prelude::*;
//!
//! let server = RestServer::new(HyperClient::builder().with_logging().build(), "https://hapi.fhir.org/baseR4")?;
//!
//! let response = server.get_json("Patient/example").await?;
//! if let Some(err) = response.error() {
//!     return Err(format!("{}: {err}", err.code()).into());
//! }
//! let patient = response.body();
//! ```

mod callback;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod server;

pub use callback::{ServerCallback, ServerCallbackExt};
pub use client::{
    BoxedService, DEFAULT_USER_AGENT, HyperClient, HyperClientBuilder, RawResponse, ServiceFuture,
};
pub use config::ServerConfig;
pub use server::RestServer;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use fhir_client_core::{
    ContentType, Error, ErrorDomain, FhirServer, HttpClient, JsonObject, JsonServerResponse,
    Method, Outcome, Request, RequestBuilder, Result, ServerError, ServerResponse,
    TransportResponse, from_json_value, reason_phrase, to_json,
};

// Re-export http types for status codes and headers
pub use fhir_client_core::{StatusCode, header};
