//! One-shot callback completion on top of [`FhirServer`] futures.
//!
//! For callers that want `(response, error)`-style completion instead of
//! awaiting. The request runs on the current tokio runtime; the callback is
//! `FnOnce` and runs at most once. Aborting the returned handle cancels the
//! request and the callback never runs.

use tokio::task::JoinHandle;

use crate::{FhirServer, JsonObject, JsonServerResponse, Result};

/// Callback invoked with the outcome of a request.
pub trait ServerCallback: FnOnce(Result<JsonServerResponse>) + Send + 'static {}

impl<F> ServerCallback for F where F: FnOnce(Result<JsonServerResponse>) + Send + 'static {}

/// Callback-style variants of the [`FhirServer`] methods.
///
/// Must be called from within a tokio runtime.
pub trait ServerCallbackExt: FhirServer + Clone + 'static {
    /// GET `path`, then call `callback`.
    fn get_json_then(&self, path: impl Into<String>, callback: impl ServerCallback) -> JoinHandle<()> {
        let server = self.clone();
        let path = path.into();
        tokio::spawn(async move {
            callback(server.get_json(&path).await);
        })
    }

    /// PUT `body` at `path`, then call `callback`.
    fn put_json_then(
        &self,
        path: impl Into<String>,
        body: JsonObject,
        callback: impl ServerCallback,
    ) -> JoinHandle<()> {
        let server = self.clone();
        let path = path.into();
        tokio::spawn(async move {
            callback(server.put_json(&path, &body).await);
        })
    }

    /// POST `body` at `path`, then call `callback`.
    fn post_json_then(
        &self,
        path: impl Into<String>,
        body: JsonObject,
        callback: impl ServerCallback,
    ) -> JoinHandle<()> {
        let server = self.clone();
        let path = path.into();
        tokio::spawn(async move {
            callback(server.post_json(&path, &body).await);
        })
    }
}

impl<S> ServerCallbackExt for S where S: FhirServer + Clone + 'static {}
