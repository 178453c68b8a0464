//! HTTP method types.

use derive_more::Display;

/// HTTP methods used against a FHIR REST endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET - read or search.
    #[display("GET")]
    Get,
    /// PUT - update a resource.
    #[display("PUT")]
    Put,
    /// POST - create a resource, or run an operation.
    #[display("POST")]
    Post,
}

impl Method {
    /// Returns `true` if the method sends a request body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Put | Self::Post)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Put => Self::PUT,
            Method::Post => Self::POST,
        }
    }
}
