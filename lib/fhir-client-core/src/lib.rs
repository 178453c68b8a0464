//! Core types and traits for the FHIR REST client.
//!
//! This crate performs no I/O. It provides:
//! - [`ServerResponse`] - status and headers, with an error derived from failing statuses
//! - [`JsonServerResponse`] - a [`ServerResponse`] with an optional JSON object body
//! - [`ServerError`] and [`ErrorDomain`] - errors of completed exchanges
//! - [`Error`] and [`Result`] - errors of requests that never completed
//! - [`FhirServer`] - the server capability: base URL plus JSON GET/PUT/POST
//! - [`HttpClient`] - transport trait executing a single [`Request`]
//! - [`TransportResponse`] - raw response accepted by the response constructors
//! - [`Method`], [`Request`] and [`RequestBuilder`] - request types

mod body;
mod client;
mod error;
mod method;
pub mod prelude;
mod request;
mod response;
mod server;
mod transport;

pub use body::{ContentType, from_json_value, to_json};
pub use client::HttpClient;
pub use error::{Error, ErrorDomain, Result, ServerError, reason_phrase};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::{JsonObject, JsonServerResponse, Outcome, ServerResponse};
pub use server::FhirServer;
pub use transport::TransportResponse;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
