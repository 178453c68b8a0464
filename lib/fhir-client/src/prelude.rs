//! Prelude module for convenient imports.
//!
//! ```ignore
//! use fhir_client::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, ErrorDomain, FhirServer, HttpClient, HyperClient, JsonObject,
    JsonServerResponse, Outcome, RestServer, Result, ServerCallbackExt, ServerConfig,
    ServerError, ServerResponse, StatusCode,
};
