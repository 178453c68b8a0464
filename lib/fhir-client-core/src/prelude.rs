//! Prelude module for convenient imports.
//!
//! ```ignore
//! use fhir_client_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, ErrorDomain, FhirServer, HttpClient, JsonObject, JsonServerResponse,
    Method, Outcome, Request, RequestBuilder, Result, ServerError, ServerResponse,
    TransportResponse,
};
