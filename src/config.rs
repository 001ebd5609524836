//! Client configuration.
//!
//! The backend location is always injected; the client never assumes one.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Default request timeout, matching the backend's own AI call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for a [`ReviewClient`](crate::ReviewClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute URL (`https://host/prefix`) or relative prefix (`/api`).
    pub base_url: String,

    /// Origin that a relative `base_url` is resolved against.
    pub origin: Option<String>,

    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with no origin and the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            origin: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the origin used to resolve a relative base URL.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves the configured base into an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base is blank, if it is relative
    /// and no origin is configured, or if either part fails to parse.
    pub fn resolve_base_url(&self) -> Result<Url> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(Error::configuration("base URL is empty", None));
        }
        match Url::parse(base) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = self.origin.as_deref().ok_or_else(|| {
                    Error::configuration(
                        format!("relative base URL `{base}` requires an origin"),
                        None,
                    )
                })?;
                Ok(Url::parse(origin)?.join(base)?)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Joins an endpoint path onto a resolved base, tolerating trailing slashes.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_base() {
        let config = ClientConfig::new("https://backend.example.com");
        let base = config.resolve_base_url().unwrap();
        assert_eq!(
            endpoint_url(&base, "/chat"),
            "https://backend.example.com/chat"
        );
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn absolute_base_with_prefix_and_slash() {
        let config = ClientConfig::new("http://localhost:8000/api/");
        let base = config.resolve_base_url().unwrap();
        assert_eq!(
            endpoint_url(&base, "/explain-file"),
            "http://localhost:8000/api/explain-file"
        );
    }

    #[test]
    fn relative_prefix_resolves_against_origin() {
        let config = ClientConfig::new("/api").with_origin("http://dashboard.local:5173");
        let base = config.resolve_base_url().unwrap();
        assert_eq!(
            endpoint_url(&base, "/full-code-review"),
            "http://dashboard.local:5173/api/full-code-review"
        );
    }

    #[test]
    fn relative_prefix_without_origin_is_rejected() {
        let err = ClientConfig::new("/api").resolve_base_url().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.message().contains("/api"));
    }

    #[test]
    fn blank_base_is_rejected() {
        let err = ClientConfig::new("   ").resolve_base_url().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn builder_pattern() {
        let config = ClientConfig::new("/api")
            .with_origin("http://localhost:8000")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.origin.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
