//! HTTP request building.
//!
//! # Example
//!
//! ```
//! use fhir_client_core::{Method, Request};
//! use bytes::Bytes;
//!
//! let request = Request::<Bytes>::builder(Method::Get, "https://hapi.fhir.org/baseR4/Patient".parse().unwrap())
//!     .header("Accept", "application/fhir+json")
//!     .query("family", "Chalmers")
//!     .build();
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{ContentType, Method};

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body with the given content type.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(
        self,
        value: &T,
        content_type: ContentType,
    ) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header(http::header::CONTENT_TYPE.as_str(), content_type.as_str())
            .body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_basic() {
        let url = url::Url::parse("https://fhir.example.com/r4/Patient/1").expect("valid URL");
        let request = Request::<Bytes>::builder(Method::Get, url)
            .header("accept", "application/fhir+json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://fhir.example.com/r4/Patient/1");
        assert_eq!(request.header("accept"), Some("application/fhir+json"));
        assert!(request.body().is_none());
    }

    #[test]
    fn request_builder_with_query() {
        let url = url::Url::parse("https://fhir.example.com/r4/Patient").expect("valid URL");
        let request = Request::<Bytes>::builder(Method::Get, url)
            .query("family", "Chalmers")
            .query("_count", "10")
            .build();

        assert_eq!(
            request.url().as_str(),
            "https://fhir.example.com/r4/Patient?family=Chalmers&_count=10"
        );
    }

    #[test]
    fn request_builder_json() {
        let url = url::Url::parse("https://fhir.example.com/r4/Patient").expect("valid URL");
        let request = Request::builder(Method::Post, url)
            .json(
                &serde_json::json!({"resourceType": "Patient"}),
                ContentType::FhirJson,
            )
            .expect("json")
            .build();

        assert_eq!(
            request.header("content-type"),
            Some("application/fhir+json")
        );
        assert_eq!(
            request.body().map(|body| &body[..]),
            Some(&br#"{"resourceType":"Patient"}"#[..])
        );
    }

    #[test]
    fn request_into_parts() {
        let url = url::Url::parse("https://fhir.example.com/r4/Patient/1").expect("valid URL");
        let request = Request::builder(Method::Put, url)
            .headers([("if-match".to_string(), "W/\"2\"".to_string())])
            .body(Bytes::from_static(b"{}"))
            .build();

        let (method, url, headers, body) = request.into_parts();
        assert_eq!(method, Method::Put);
        assert_eq!(url.path(), "/r4/Patient/1");
        assert_eq!(headers["if-match"], "W/\"2\"");
        assert_eq!(body, Some(Bytes::from_static(b"{}")));
    }
}
