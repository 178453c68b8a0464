//! Base-URL-bound FHIR server.
//!
//! [`RestServer`] wraps any [`HttpClient`] with a base URL and implements
//! [`FhirServer`].

use std::future::Future;

use bytes::Bytes;
use tracing::{debug, warn};
use url::Url;

use crate::{
    Error, FhirServer, HttpClient, JsonObject, JsonServerResponse, Method, Request, Result,
    ServerConfig, header,
};

/// A FHIR REST endpoint reached through an [`HttpClient`].
///
/// # Example
///
/// ```ignore
/// use fhir_client::{FhirServer, HyperClient, RestServer};
///
/// let server = RestServer::new(HyperClient::new(), "https://hapi.fhir.org/baseR4")?;
/// let response = server.get_json("Patient/example").await?;
/// match response.error() {
///     Some(err) => eprintln!("server said no: {err}"),
///     None => println!("{:?}", response.body()),
/// }
/// ```
#[derive(Debug)]
pub struct RestServer<C> {
    client: C,
    config: ServerConfig,
}

impl<C: Clone> Clone for RestServer<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
        }
    }
}

impl<C> RestServer<C> {
    /// Create a server from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self::with_config(client, ServerConfig::new(base_url)?))
    }

    /// Create a server from a parsed base URL.
    #[must_use]
    pub fn with_url(client: C, base_url: Url) -> Self {
        Self::with_config(client, ServerConfig::from_url(base_url))
    }

    /// Create a server from a full endpoint configuration.
    #[must_use]
    pub const fn with_config(client: C, config: ServerConfig) -> Self {
        Self { client, config }
    }

    /// Endpoint configuration.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Resolve `path` against the base URL, see [`ServerConfig::resolve`].
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.config.resolve(path)
    }

    /// Get a reference to the inner HTTP client.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the wrapper and return the inner HTTP client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }
}

impl<C: HttpClient> RestServer<C> {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonObject>,
    ) -> Result<JsonServerResponse> {
        let url = self.resolve(path)?;
        let format = self.config.format();
        let mut builder =
            Request::<Bytes>::builder(method, url).header(header::ACCEPT.as_str(), format.as_str());
        if method.has_body() {
            let body = body.ok_or_else(|| {
                Error::invalid_request(format!("{method} {path} needs a JSON body"))
            })?;
            builder = builder.json(body, format)?;
        }

        let raw = self.client.execute(builder.build()).await?;
        let response = JsonServerResponse::from_transport(&raw, Some(raw.body()));

        match response.error() {
            Some(err) => warn!(
                %method,
                path,
                code = err.code(),
                decode_failure = err.is_decode_failure(),
                error = %err,
                "server returned an error"
            ),
            None => debug!(%method, path, status = response.status(), "server response"),
        }

        Ok(response)
    }
}

impl<C: HttpClient> FhirServer for RestServer<C> {
    fn base_url(&self) -> &Url {
        self.config.base_url()
    }

    fn get_json(&self, path: &str) -> impl Future<Output = Result<JsonServerResponse>> + Send {
        self.send(Method::Get, path, None)
    }

    fn put_json(
        &self,
        path: &str,
        body: &JsonObject,
    ) -> impl Future<Output = Result<JsonServerResponse>> + Send {
        self.send(Method::Put, path, Some(body))
    }

    fn post_json(
        &self,
        path: &str,
        body: &JsonObject,
    ) -> impl Future<Output = Result<JsonServerResponse>> + Send {
        self.send(Method::Post, path, Some(body))
    }
}
