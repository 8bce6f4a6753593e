//! HTTP transport layer
//!
//! Performs one HTTP call and returns the raw response body, or a classified
//! transport failure. Any non-2xx status is an error at this layer; envelope
//! decoding and API error mapping happen in [`crate::client`]. No retries
//! here, bounded retry is a repository-level policy.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

/// Progress callback: `(bytes_received, total_expected)`, where
/// `total_expected` is `-1` when the server omits a content length.
pub type ProgressFn = Box<dyn Fn(u64, i64) + Send + Sync>;

/// Minimum number of new bytes between two progress callbacks.
/// A final callback always fires with the complete totals.
const PROGRESS_GRANULARITY: u64 = 64 * 1024;

/// A single file to submit as a multipart form part
#[derive(Debug, Clone)]
pub struct MultipartFile {
    /// Form field name, e.g. "file"
    pub field_name: String,
    /// File name reported to the server
    pub file_name: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

/// Closed set of transport-level failures
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request URL could not be built or parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status
    #[error("HTTP status {status}")]
    Http {
        /// The HTTP status code
        status: u16,
    },

    /// The request exceeded its timeout
    #[error("Request timed out")]
    Timeout,

    /// The connection could not be established
    #[error("No network connection")]
    NoConnection,

    /// TLS negotiation or certificate validation failed
    #[error("TLS error: {0}")]
    Ssl(String),

    /// The caller cancelled the request mid-flight
    #[error("Request cancelled")]
    Cancelled,

    /// Anything that cannot be classified more precisely
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// Classifies a reqwest error into the closed transport set
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TransportError::Timeout;
        }
        if err.is_builder() {
            return TransportError::InvalidUrl(err.to_string());
        }
        if err.is_connect() {
            let detail = err.to_string();
            let lowered = detail.to_lowercase();
            if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl")
            {
                return TransportError::Ssl(detail);
            }
            return TransportError::NoConnection;
        }
        let detail = err.to_string();
        if detail.to_lowercase().contains("cancel") {
            return TransportError::Cancelled;
        }
        TransportError::InvalidResponse(detail)
    }
}

/// Raw HTTP operations the API client is built on
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET and return the body bytes
    async fn get(&self, url: Url) -> Result<Vec<u8>, TransportError>;

    /// POST an `application/x-www-form-urlencoded` body
    async fn post_form(&self, url: Url, body: String) -> Result<Vec<u8>, TransportError>;

    /// POST a multipart form with text fields plus one file part
    async fn post_multipart(
        &self,
        url: Url,
        fields: Vec<(String, String)>,
        file: MultipartFile,
    ) -> Result<Vec<u8>, TransportError>;

    /// GET a potentially large body, reporting progress as it streams in
    async fn download_with_progress(
        &self,
        url: Url,
        on_progress: Option<&ProgressFn>,
    ) -> Result<Vec<u8>, TransportError>;
}

// ============================================================================
// ReqwestTransport
// ============================================================================

/// [`Transport`] implementation over `reqwest`
///
/// Carries two clients: one with the regular request timeout and one with
/// the extended download timeout for large transfers.
pub struct ReqwestTransport {
    client: Client,
    download_client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given request and download timeouts
    pub fn new(request_timeout: Duration, download_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        let download_client = Client::builder().timeout(download_timeout).build()?;
        Ok(Self {
            client,
            download_client,
        })
    }

    /// Transport with the stock timeouts: 30s requests, 600s downloads
    pub fn with_default_timeouts() -> anyhow::Result<Self> {
        Self::new(Duration::from_secs(30), Duration::from_secs(600))
    }

    fn check_status(status: StatusCode) -> Result<(), TransportError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Http {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<Vec<u8>, TransportError> {
        trace!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        Self::check_status(response.status())?;
        let body = response
            .bytes()
            .await
            .map_err(TransportError::from_reqwest)?;
        Ok(body.to_vec())
    }

    async fn post_form(&self, url: Url, body: String) -> Result<Vec<u8>, TransportError> {
        trace!(%url, "POST form");
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        Self::check_status(response.status())?;
        let body = response
            .bytes()
            .await
            .map_err(TransportError::from_reqwest)?;
        Ok(body.to_vec())
    }

    async fn post_multipart(
        &self,
        url: Url,
        fields: Vec<(String, String)>,
        file: MultipartFile,
    ) -> Result<Vec<u8>, TransportError> {
        trace!(%url, file = %file.file_name, "POST multipart");
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in fields {
            form = form.text(key, value);
        }
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str("application/octet-stream")
            .map_err(TransportError::from_reqwest)?;
        form = form.part(file.field_name, part);

        let response = self
            .download_client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        Self::check_status(response.status())?;
        let body = response
            .bytes()
            .await
            .map_err(TransportError::from_reqwest)?;
        Ok(body.to_vec())
    }

    async fn download_with_progress(
        &self,
        url: Url,
        on_progress: Option<&ProgressFn>,
    ) -> Result<Vec<u8>, TransportError> {
        debug!(%url, "download");
        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;
        Self::check_status(response.status())?;

        let total: i64 = response
            .content_length()
            .map_or(-1, |len| i64::try_from(len).unwrap_or(-1));

        let mut body = Vec::new();
        let mut last_reported: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(TransportError::from_reqwest)?;
            body.extend_from_slice(&chunk);
            let received = body.len() as u64;
            if let Some(progress) = on_progress {
                if received - last_reported >= PROGRESS_GRANULARITY {
                    progress(received, total);
                    last_reported = received;
                }
            }
        }
        // Final callback always carries the complete totals
        if let Some(progress) = on_progress {
            progress(body.len() as u64, total);
        }
        Ok(body)
    }
}

// ============================================================================
// Tests
// ============================================================================
