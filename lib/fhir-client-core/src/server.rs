//! FHIR server capability.
//!
//! [`FhirServer`] is the minimal interface resource-level code depends on: a
//! base URL and JSON GET/PUT/POST relative to it.

use std::future::Future;

use url::Url;

use crate::{JsonObject, JsonServerResponse, Result};

/// A FHIR REST endpoint.
///
/// Every request future resolves exactly once:
/// - `Ok(response)` when the exchange completed. The server may still have
///   said no: check [`JsonServerResponse::error`].
/// - `Err(error)` when the request never completed (DNS, connect, TLS,
///   timeout, invalid URL).
///
/// No ordering is promised between concurrent requests, and no retry is
/// performed.
///
/// # Example
///
/// ```ignore
/// let response = server.get_json("Patient/example").await?;
/// if let Some(err) = response.error() {
///     eprintln!("{} {}: {err}", err.domain(), err.code());
/// } else if let Some(patient) = response.body() {
///     println!("{}", patient["id"]);
/// }
/// ```
pub trait FhirServer: Send + Sync {
    /// Base URL all paths are resolved against.
    fn base_url(&self) -> &Url;

    /// GET `path`, relative to [`FhirServer::base_url`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the request never completed.
    fn get_json(&self, path: &str) -> impl Future<Output = Result<JsonServerResponse>> + Send;

    /// PUT `body` as JSON at `path`, relative to [`FhirServer::base_url`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the request never completed.
    fn put_json(
        &self,
        path: &str,
        body: &JsonObject,
    ) -> impl Future<Output = Result<JsonServerResponse>> + Send;

    /// POST `body` as JSON at `path`, relative to [`FhirServer::base_url`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the request never completed.
    fn post_json(
        &self,
        path: &str,
        body: &JsonObject,
    ) -> impl Future<Output = Result<JsonServerResponse>> + Send;
}
