//! HTTP transport trait.
//!
//! [`HttpClient`] executes one request and hands back the raw exchange.
//! Implement it to plug in a different transport, or a test double.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Result};

/// Core HTTP client trait.
///
/// A returned `Ok` means the exchange completed, whatever its status code.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request never completed:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<http::Response<Bytes>>> + Send;
}
