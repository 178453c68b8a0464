//! FHIR exchange logging.
//!
//! Every exchange runs inside a `fhir_request` span holding the method and
//! the resolved resource path. The request line says whether a resource body
//! was sent and whether the URL is a search. The completion line carries the
//! status and response media type, plus `Location` and `ETag` when the server
//! reports where a created or updated resource lives.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use http::header::{CONTENT_LOCATION, CONTENT_TYPE, ETAG, HeaderName, LOCATION};
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{ContentType, Error, Request, Result, client::RawResponse, reason_phrase};

/// Layer that logs each FHIR exchange.
///
/// # Example
///
/// ```ignore
/// use fhir_client::HyperClient;
/// use fhir_client::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::new())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level, with request headers.
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Log a summary of each exchange at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log request headers, at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

/// What is logged about a request before it goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Outgoing {
    path: String,
    search: bool,
    body_bytes: Option<usize>,
}

impl Outgoing {
    fn of(request: &Request<Bytes>) -> Self {
        let url = request.url();
        Self {
            path: url.path().to_string(),
            search: url.query().is_some_and(|query| !query.is_empty()),
            body_bytes: request.body().map(Bytes::len),
        }
    }
}

/// What is logged about a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Completed {
    status: u16,
    body_bytes: usize,
    media_type: Option<String>,
    location: Option<String>,
    version: Option<String>,
}

impl Completed {
    fn of(response: &RawResponse) -> Self {
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        Self {
            status: response.status().as_u16(),
            body_bytes: response.body().len(),
            media_type: header(CONTENT_TYPE)
                .and_then(|value| value.split(';').next().map(|media| media.trim().to_string())),
            location: header(LOCATION).or_else(|| header(CONTENT_LOCATION)),
            version: header(ETAG),
        }
    }

    fn is_fhir_json(&self) -> bool {
        self.media_type.as_deref() == Some(ContentType::FhirJson.as_str())
    }
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = RawResponse, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = RawResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let method = request.method();
        let outgoing = Outgoing::of(&request);
        let level = self.level;

        let span = span!(Level::INFO, "fhir_request", %method, path = %outgoing.path);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                let search = outgoing.search;
                let body_bytes = outgoing.body_bytes;
                match level {
                    LogLevel::Debug => {
                        debug!(search, ?body_bytes, headers = ?request.headers(), "sending request");
                    }
                    LogLevel::Info => info!(search, ?body_bytes, "sending request"),
                }

                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        let done = Completed::of(response);
                        let status = done.status;
                        let bytes = done.body_bytes;
                        let media_type = done.media_type.as_deref().unwrap_or("-");
                        if response.status().is_success() {
                            info!(
                                status,
                                bytes,
                                media_type,
                                fhir_json = done.is_fhir_json(),
                                location = ?done.location,
                                version = ?done.version,
                                elapsed_ms,
                                "request completed"
                            );
                        } else {
                            warn!(
                                status,
                                reason = %reason_phrase(status),
                                bytes,
                                media_type,
                                elapsed_ms,
                                "server answered with an error status"
                            );
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "request did not complete");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Method;

    fn url(path: &str) -> url::Url {
        url::Url::parse(&format!("https://fhir.example.com/r4/{path}")).expect("valid URL")
    }

    #[test]
    fn logging_layer_levels() {
        assert_eq!(LoggingLayer::new().level(), LogLevel::Info);
        assert_eq!(LoggingLayer::debug().level(), LogLevel::Debug);
        assert_eq!(LoggingLayer::debug().layer(()).level, LogLevel::Debug);
    }

    #[test]
    fn outgoing_search_without_body() {
        let request = Request::<Bytes>::builder(Method::Get, url("Patient?family=Chalmers")).build();

        let outgoing = Outgoing::of(&request);
        assert_eq!(outgoing.path, "/r4/Patient");
        assert!(outgoing.search);
        assert_eq!(outgoing.body_bytes, None);
    }

    #[test]
    fn outgoing_update_with_body() {
        let request = Request::builder(Method::Put, url("Patient/42"))
            .body(Bytes::from_static(br#"{"id":"42"}"#))
            .build();

        let outgoing = Outgoing::of(&request);
        assert_eq!(outgoing.path, "/r4/Patient/42");
        assert!(!outgoing.search);
        assert_eq!(outgoing.body_bytes, Some(11));
    }

    #[test]
    fn completed_create_reports_location_and_version() {
        let response = http::Response::builder()
            .status(201)
            .header("content-type", "application/fhir+json; charset=utf-8")
            .header("location", "Patient/99/_history/1")
            .header("etag", r#"W/"1""#)
            .body(Bytes::from_static(b"{}"))
            .expect("valid response");

        let done = Completed::of(&response);
        assert_eq!(done.status, 201);
        assert_eq!(done.body_bytes, 2);
        assert_eq!(done.media_type.as_deref(), Some("application/fhir+json"));
        assert!(done.is_fhir_json());
        assert_eq!(done.location.as_deref(), Some("Patient/99/_history/1"));
        assert_eq!(done.version.as_deref(), Some(r#"W/"1""#));
    }

    #[test]
    fn completed_falls_back_to_content_location() {
        let response = http::Response::builder()
            .status(200)
            .header("content-type", "application/json")
            .header("content-location", "Patient/1/_history/3")
            .body(Bytes::new())
            .expect("valid response");

        let done = Completed::of(&response);
        assert!(!done.is_fhir_json());
        assert_eq!(done.location.as_deref(), Some("Patient/1/_history/3"));
        assert_eq!(done.version, None);
    }

    #[tokio::test]
    async fn logging_passes_exchange_through() {
        let inner = tower::service_fn(|request: Request<Bytes>| async move {
            let status = if request.body().is_some() { 201 } else { 400 };
            Ok::<_, Error>(
                http::Response::builder()
                    .status(status)
                    .body(Bytes::new())
                    .expect("valid response"),
            )
        });
        let mut service = LoggingLayer::debug().layer(inner);

        let created = service
            .call(
                Request::builder(Method::Post, url("Patient"))
                    .body(Bytes::from_static(b"{}"))
                    .build(),
            )
            .await
            .expect("completed");
        assert_eq!(created.status(), 201);

        let rejected = service
            .call(Request::builder(Method::Post, url("Patient")).build())
            .await
            .expect("completed");
        assert_eq!(rejected.status(), 400);
    }
}
