//! Raw transport responses.
//!
//! [`TransportResponse`] is what a concrete transport hands over once an
//! exchange has completed: a status code and a header map.

use std::collections::HashMap;

use http::HeaderMap;

/// A completed HTTP exchange, before any JSON-specific processing.
pub trait TransportResponse {
    /// Numeric status code.
    fn status_code(&self) -> u16;

    /// Raw response headers.
    fn header_map(&self) -> &HeaderMap;
}

impl<B> TransportResponse for http::Response<B> {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    fn header_map(&self) -> &HeaderMap {
        self.headers()
    }
}

impl TransportResponse for http::response::Parts {
    fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    fn header_map(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Convert a header map to string pairs.
///
/// Values that are not visible ASCII are dropped. Repeated names are joined
/// with `", "` in arrival order.
pub(crate) fn string_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut out: HashMap<String, String> = HashMap::with_capacity(headers.keys_len());

    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            tracing::debug!(header = %name, value = ?value, "dropping non-string header value");
            continue;
        };

        out.entry(name.to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn keeps_string_values() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/fhir+json"));
        headers.insert("etag", HeaderValue::from_static("W/\"3\""));

        let out = string_headers(&headers);
        assert_eq!(out.len(), 2);
        assert_eq!(out["content-type"], "application/fhir+json");
        assert_eq!(out["etag"], "W/\"3\"");
    }

    #[test]
    fn drops_non_string_values() {
        let mut headers = HeaderMap::new();
        headers.insert("location", HeaderValue::from_static("Patient/1/_history/2"));
        headers.insert(
            "x-binary",
            HeaderValue::from_bytes(&[0xfa, 0xfb]).expect("opaque bytes are valid"),
        );

        let out = string_headers(&headers);
        assert_eq!(out.len(), 1);
        assert_eq!(out["location"], "Patient/1/_history/2");
        assert!(!out.contains_key("x-binary"));
    }

    #[test]
    fn joins_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append("vary", HeaderValue::from_static("accept"));
        headers.append("vary", HeaderValue::from_static("origin"));

        let out = string_headers(&headers);
        assert_eq!(out["vary"], "accept, origin");
    }

    #[test]
    fn http_response_is_transport_response() {
        let response = http::Response::builder()
            .status(201)
            .header("location", "Patient/7")
            .body(())
            .expect("valid response");

        assert_eq!(response.status_code(), 201);
        assert_eq!(response.header_map().len(), 1);

        let (parts, ()) = response.into_parts();
        assert_eq!(parts.status_code(), 201);
        assert!(parts.header_map().contains_key("location"));
    }
}
