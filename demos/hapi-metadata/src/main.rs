//! HAPI Metadata Example
//!
//! Fetches a server's `CapabilityStatement` and lists what it supports.
//!
//! ```text
//! cargo run -p hapi-metadata-demo -- https://hapi.fhir.org/baseR4
//! ```

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use fhir_client::middleware::LoggingLayer;
use fhir_client::{FhirServer, HyperClient, RestServer};
use serde::Deserialize;

const PUBLIC_HAPI: &str = "https://hapi.fhir.org/baseR4";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ============================================================================
// Data Types
// ============================================================================

/// The parts of a `CapabilityStatement` this example prints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub fhir_version: String,
    #[serde(default)]
    pub software: Option<Software>,
    #[serde(default)]
    pub rest: Vec<Rest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Software {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rest {
    pub mode: String,
    #[serde(default)]
    pub resource: Vec<RestResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestResource {
    #[serde(rename = "type")]
    pub resource_type: String,
}

impl Capabilities {
    /// Resource types served in `server` mode, sorted.
    #[must_use]
    pub fn resource_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .rest
            .iter()
            .filter(|rest| rest.mode == "server")
            .flat_map(|rest| rest.resource.iter().map(|r| r.resource_type.as_str()))
            .collect();
        types.sort_unstable();
        types
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// GET `metadata` and decode the `CapabilityStatement`.
///
/// Every way this can fail collapses into one boxed error here.
pub async fn capabilities(server: &impl FhirServer) -> Result<Capabilities, BoxError> {
    let response = server.get_json("metadata").await?;
    if let Some(err) = response.error() {
        return Err(err.clone().into());
    }

    match response.json::<Capabilities>() {
        Some(capabilities) => Ok(capabilities?),
        None => Err(format!("{} sent no CapabilityStatement", server.base_url()).into()),
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| PUBLIC_HAPI.to_string());

    let client = HyperClient::builder().layer(LoggingLayer::new()).build();
    let server = RestServer::new(client, &base_url)?;

    let capabilities = capabilities(&server).await?;

    println!("Server: {}", server.base_url());
    println!("FHIR version: {}", capabilities.fhir_version);
    if let Some(software) = &capabilities.software {
        println!(
            "Software: {} {}",
            software.name,
            software.version.as_deref().unwrap_or("")
        );
    }
    let types = capabilities.resource_types();
    println!("{} resource types: {}", types.len(), types.join(", "));

    Ok(())
}

// ============================================================================
// Tests using wiremock
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    async fn mock_metadata(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/baseR4/metadata"))
            .and(header("Accept", "application/fhir+json"))
            .respond_with(template)
            .mount(&mock_server)
            .await;
        mock_server
    }

    fn server_for(mock_server: &MockServer) -> RestServer<HyperClient> {
        RestServer::new(HyperClient::new(), format!("{}/baseR4", mock_server.uri()))
            .expect("valid base URL")
    }

    #[tokio::test]
    async fn test_capabilities() {
        let mock_server = mock_metadata(ResponseTemplate::new(200).set_body_json(json!({
            "resourceType": "CapabilityStatement",
            "fhirVersion": "4.0.1",
            "software": {"name": "HAPI FHIR Server", "version": "7.4.0"},
            "rest": [{
                "mode": "server",
                "resource": [{"type": "Patient"}, {"type": "Observation"}]
            }]
        })))
        .await;

        let capabilities = capabilities(&server_for(&mock_server))
            .await
            .expect("capabilities");

        assert_eq!(capabilities.fhir_version, "4.0.1");
        assert_eq!(
            capabilities.software.as_ref().map(|s| s.name.as_str()),
            Some("HAPI FHIR Server")
        );
        assert_eq!(capabilities.resource_types(), vec!["Observation", "Patient"]);
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let mock_server = mock_metadata(ResponseTemplate::new(503)).await;

        let err = capabilities(&server_for(&mock_server))
            .await
            .expect_err("server error");
        assert_eq!(err.to_string(), "service unavailable");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_reported() {
        let mock_server = mock_metadata(
            ResponseTemplate::new(200).set_body_json(json!({"resourceType": "OperationOutcome"})),
        )
        .await;

        let err = capabilities(&server_for(&mock_server))
            .await
            .expect_err("missing fhirVersion");
        assert!(err.to_string().contains("fhirVersion"));
    }
}
