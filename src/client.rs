use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response};
use url::Url;

use crate::client_logger::ClientLogger;
use crate::config::{ClientConfig, endpoint_url};
use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_BACKEND_REJECTIONS, CLIENT_MALFORMED_RESPONSES, CLIENT_REQUEST_DURATION,
    CLIENT_REQUESTS, CLIENT_TRANSPORT_ERRORS, CLIENT_UPLOAD_BYTES,
};
use crate::types::backend_reply::decode_field;
use crate::types::{
    BackendCall, BackendReply, FileHandle, HealthStatus, Mode, Payload, rejection_message,
};

const HEALTH_PATH: &str = "/health";
const MULTIPART_FIELD: &str = "files";
const FILE_MIME_TYPE: &str = "application/octet-stream";

/// The seam between the session orchestrator and the network.
///
/// [`ReviewClient`] is the production implementation; tests substitute
/// scripted backends.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Performs one exchange and returns the displayable result text.
    async fn execute(&self, call: BackendCall) -> Result<String>;
}

/// Client for the code-review backend.
#[derive(Clone)]
pub struct ReviewClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl std::fmt::Debug for ReviewClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl ReviewClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL cannot be resolved or
    /// the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.resolve_base_url()?;
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .default_headers(default_headers())
            .build()
            .map_err(|e| {
                Error::configuration(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every exchange.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The resolved base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The full URL for `mode`'s endpoint.
    pub fn endpoint(&self, mode: Mode) -> String {
        endpoint_url(&self.base_url, mode.endpoint_path())
    }

    /// Send a chat message and return the reply.
    ///
    /// The text is forwarded as-is; blank messages are the caller's concern.
    pub async fn chat(&self, text: &str) -> Result<String> {
        self.execute_call(BackendCall::chat(text)).await
    }

    /// Request a full review of the repository at `url`.
    pub async fn review_repository(&self, url: &str) -> Result<String> {
        self.execute_call(BackendCall::review_repository(url)).await
    }

    /// Upload `files` for analysis, in order.
    ///
    /// An empty slice is rejected before any I/O.
    pub async fn analyze_files(&self, files: &[FileHandle]) -> Result<String> {
        self.execute_call(BackendCall::analyze_files(files.to_vec()))
            .await
    }

    /// Probe the backend's health endpoint and return its status string.
    pub async fn health(&self) -> Result<String> {
        let url = endpoint_url(&self.base_url, HEALTH_PATH);
        let response = self.send(self.client.get(&url)).await?;
        let body = self.success_body(response).await?;
        decode_field::<HealthStatus>("status", &body).map(|health| health.status)
    }

    async fn execute_call(&self, call: BackendCall) -> Result<String> {
        let mode = call.operation();
        if let Some(logger) = &self.logger {
            logger.log_request(&call);
        }
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.dispatch(call).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        match &result {
            Ok(text) => {
                tracing::debug!(%mode, bytes = text.len(), "backend call succeeded");
                if let Some(logger) = &self.logger {
                    logger.log_response(mode, text);
                }
            }
            Err(err) => {
                match err {
                    Error::Transport { .. } => CLIENT_TRANSPORT_ERRORS.click(),
                    Error::BackendRejected { .. } => CLIENT_BACKEND_REJECTIONS.click(),
                    Error::MalformedResponse { .. } => CLIENT_MALFORMED_RESPONSES.click(),
                    _ => {}
                }
                tracing::warn!(%mode, kind = ?err.kind(), error = %err, "backend call failed");
                if let Some(logger) = &self.logger {
                    logger.log_error(mode, err);
                }
            }
        }
        result
    }

    async fn dispatch(&self, call: BackendCall) -> Result<String> {
        let (mode, payload) = call.into_parts();
        let url = self.endpoint(mode);
        tracing::debug!(%mode, %url, "dispatching backend call");

        let request = match payload {
            Payload::Json(body) => self.client.post(&url).json(&body),
            Payload::Multipart(files) => {
                let form = build_form(&files).await?;
                self.client.post(&url).multipart(form)
            }
        };

        let response = self.send(request).await?;
        let body = self.success_body(response).await?;
        BackendReply::decode(mode, &body).map(BackendReply::into_text)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    /// Maps a reqwest failure on the wire, before or after the headers.
    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out after {}s: {}", self.timeout.as_secs(), e),
                Some(Box::new(e)),
            )
        } else if e.is_connect() {
            Error::transport(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::transport(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Returns the body of a success response, or the normalized rejection.
    async fn success_body(&self, response: Response) -> Result<bytes::Bytes> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::process_error_response(response).await);
        }
        response.bytes().await.map_err(|e| self.transport_error(e))
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        let body = response.text().await.ok();
        Error::backend_rejected(status_code, rejection_message(body.as_deref()))
    }
}

#[async_trait::async_trait]
impl Backend for ReviewClient {
    async fn execute(&self, call: BackendCall) -> Result<String> {
        self.execute_call(call).await
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Reads every file and builds the multipart form.
///
/// All reads must succeed before anything is sent.
async fn build_form(files: &[FileHandle]) -> Result<Form> {
    if files.is_empty() {
        return Err(Error::guard_rejected("no files selected"));
    }
    let contents = futures::future::try_join_all(files.iter().map(|file| file.read())).await?;
    let mut form = Form::new();
    for (file, content) in files.iter().zip(contents) {
        CLIENT_UPLOAD_BYTES.count(content.len() as u64);
        let part = Part::bytes(content.to_vec())
            .file_name(file.name().to_string())
            .mime_str(FILE_MIME_TYPE)
            .map_err(|e| {
                Error::configuration(
                    format!("Invalid MIME type for {}: {}", file.name(), e),
                    Some(Box::new(e)),
                )
            })?;
        form = form.part(MULTIPART_FIELD, part);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ReviewClient::new(&ClientConfig::new("http://localhost:8000")).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
        assert_eq!(client.timeout(), crate::config::DEFAULT_TIMEOUT);

        let client = ReviewClient::new(
            &ClientConfig::new("/api")
                .with_origin("https://dash.example.com")
                .with_timeout(Duration::from_secs(30)),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(Mode::RepositoryReview),
            "https://dash.example.com/api/full-code-review"
        );
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn relative_base_without_origin_fails() {
        let err = ReviewClient::new(&ClientConfig::new("/api")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn empty_selection_never_touches_network() {
        // Nothing listens on port 9; a network attempt would be a transport error.
        let client = ReviewClient::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client.analyze_files(&[]).await.unwrap_err();
        assert!(err.is_guard_rejected());
    }

    #[tokio::test]
    async fn unreadable_file_aborts_before_send() {
        let client = ReviewClient::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let files = vec![
            FileHandle::from_bytes("a.py", "x"),
            FileHandle::from_path("/definitely/not/here.py"),
        ];
        let err = client.analyze_files(&files).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Io);
    }

    #[tokio::test]
    async fn refused_connection_is_transport() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client =
            ReviewClient::new(&ClientConfig::new(format!("http://127.0.0.1:{port}"))).unwrap();
        let err = client.chat("hello").await.unwrap_err();
        assert!(err.is_transport());
        assert!(!err.message().is_empty());
    }
}
