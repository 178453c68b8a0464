//! Server endpoint configuration.

use url::Url;

use crate::{ContentType, Result};

/// Where a [`RestServer`](crate::RestServer) sends requests and which JSON
/// media type it negotiates.
///
/// The base URL is kept without query or fragment and always ends with `/`,
/// so relative resource paths resolve below it.
///
/// # Example
///
/// ```ignore
/// use fhir_client::{ContentType, ServerConfig};
///
/// let config = ServerConfig::new("https://hapi.fhir.org/baseR4")?
///     .with_format(ContentType::Json);
/// assert_eq!(config.resolve("Patient/1")?.as_str(), "https://hapi.fhir.org/baseR4/Patient/1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    base_url: Url,
    format: ContentType,
}

impl ServerConfig {
    /// Parse `base_url` and negotiate `application/fhir+json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self::from_url(Url::parse(base_url.as_ref())?))
    }

    /// Use an already parsed base URL.
    #[must_use]
    pub fn from_url(mut base_url: Url) -> Self {
        base_url.set_query(None);
        base_url.set_fragment(None);
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            base_url,
            format: ContentType::FhirJson,
        }
    }

    /// Media type used for `Accept` and for request bodies.
    ///
    /// Servers that reject `application/fhir+json` usually accept plain
    /// [`ContentType::Json`].
    #[must_use]
    pub fn with_format(mut self, format: ContentType) -> Self {
        self.format = format;
        self
    }

    /// Normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Negotiated media type.
    #[must_use]
    pub const fn format(&self) -> ContentType {
        self.format
    }

    /// Resolve `path` against the base URL.
    ///
    /// Only an absolute `http`/`https` URL (a Bundle `next` link, say) replaces
    /// the base. Anything else is a path below the base path: a leading `/`
    /// is ignored, and a colon in the first segment (`Binary:1`,
    /// `urn:uuid:...`) is not read as a scheme.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(path)
            && matches!(url.scheme(), "http" | "https")
        {
            return Ok(url);
        }

        let relative = format!("./{}", path.trim_start_matches('/'));
        Ok(self.base_url.join(&relative)?)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::Error;

    fn config() -> ServerConfig {
        ServerConfig::new("https://fhir.example.com/r4?tenant=a#top").expect("valid base URL")
    }

    fn resolved(path: &str) -> String {
        config().resolve(path).expect("valid").to_string()
    }

    #[test]
    fn base_url_is_normalized() {
        let config = config();
        check!(config.base_url().as_str() == "https://fhir.example.com/r4/");
        check!(config.format() == ContentType::FhirJson);

        let already = ServerConfig::new("https://fhir.example.com/r4/").expect("valid");
        check!(already.base_url().as_str() == "https://fhir.example.com/r4/");
    }

    #[test]
    fn format_can_be_plain_json() {
        let config = config().with_format(ContentType::Json);
        check!(config.format().as_str() == "application/json");
    }

    #[test]
    fn invalid_base_url() {
        let_assert!(Err(Error::InvalidUrl(_)) = ServerConfig::new("not a url"));
    }

    #[test]
    fn resolve_stays_below_base_path() {
        check!(resolved("Patient/1") == "https://fhir.example.com/r4/Patient/1");
        check!(resolved("/Patient/1") == "https://fhir.example.com/r4/Patient/1");
        check!(resolved("//evil.example/x") == "https://fhir.example.com/r4/evil.example/x");
        check!(
            resolved("Patient?family=Chalmers")
                == "https://fhir.example.com/r4/Patient?family=Chalmers"
        );
        check!(resolved("") == "https://fhir.example.com/r4/");
    }

    #[test]
    fn colon_in_first_segment_is_not_a_scheme() {
        check!(resolved("Binary:1") == "https://fhir.example.com/r4/Binary:1");
        check!(resolved("urn:uuid:1234") == "https://fhir.example.com/r4/urn:uuid:1234");
        check!(resolved("mailto:someone") == "https://fhir.example.com/r4/mailto:someone");
    }

    #[test]
    fn absolute_http_url_replaces_base() {
        check!(
            resolved("https://fhir.example.com/r4?_getpages=abc&_page=2")
                == "https://fhir.example.com/r4?_getpages=abc&_page=2"
        );
        check!(resolved("http://other.example/fhir/Patient") == "http://other.example/fhir/Patient");
    }
}
