//! Tower middleware layers for the HTTP client.
//!
//! Layers wrap the raw transport and see every exchange as
//! `Request<Bytes>` -> `http::Response<Bytes>`.
//!
//! - [`LoggingLayer`] - logs each FHIR exchange using `tracing`
//!
//! Any other `tower::Layer` over [`crate::BoxedService`] can be added with
//! [`crate::HyperClientBuilder::layer`].

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};
