//! Envelope-aware API client
//!
//! Turns a logical operation (api name, method, version, params) into a
//! decoded result: builds the query string, attaches the session token,
//! dispatches to the transport, unwraps the `{data, success, error}`
//! envelope, and maps API error codes to domain errors.
//!
//! The server binding is swapped atomically: a request snapshots the
//! configuration up front, so an in-flight call finishes under the binding
//! it started with while later calls use the new one.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use dstation_core::domain::{DsError, ServerConfiguration, SessionId};

use crate::form;
use crate::transport::{MultipartFile, Transport, TransportError};

// ============================================================================
// Envelope
// ============================================================================

/// The `{data, success, error}` wrapper every API response is decoded through
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Payload, present on success for data-returning operations
    pub data: Option<T>,
    /// Whether the server executed the operation
    pub success: bool,
    /// Error detail, present when `success` is false
    pub error: Option<ApiErrorBody>,
}

/// Error member of the envelope
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    /// Numeric API error code
    pub code: i32,
    /// Optional human-readable detail; most firmware versions omit it
    #[serde(default)]
    pub description: Option<String>,
}

/// Maps an API error code to its domain error.
///
/// Codes 104, 105, 403, and 404 carry session/OTP semantics; every other
/// code stays an `Api` error with the code preserved.
pub fn map_api_error(code: i32, description: Option<String>) -> DsError {
    match code {
        104 => DsError::NotAuthenticated,
        105 => DsError::SessionExpired,
        403 => DsError::OtpRequired,
        404 => DsError::OtpInvalid,
        _ => DsError::Api {
            code,
            message: description.unwrap_or_else(|| describe_code(code).to_string()),
        },
    }
}

/// Stock wording for the documented error codes
fn describe_code(code: i32) -> &'static str {
    match code {
        100 => "Invalid parameter",
        101 => "The requested API does not exist",
        102 => "The requested method does not exist",
        103 => "The requested version is not supported",
        106 => "Duplicate login detected",
        _ => "Unknown API error",
    }
}

// ============================================================================
// DsApiClient
// ============================================================================

/// One server binding: base URL plus the current session token
#[derive(Debug, Clone)]
struct ClientConfig {
    base_url: Url,
    session_id: Option<SessionId>,
}

/// Session-aware API client bound to one server at a time
pub struct DsApiClient {
    transport: Arc<dyn Transport>,
    config: RwLock<Option<ClientConfig>>,
}

impl DsApiClient {
    /// Creates an unconfigured client over the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config: RwLock::new(None),
        }
    }

    /// Atomically (re)binds the client to a server and optional session token
    pub async fn configure(
        &self,
        server: &ServerConfiguration,
        session_id: Option<SessionId>,
    ) -> Result<(), DsError> {
        server.validate()?;
        let base_url = Url::parse(&server.base_url())
            .map_err(|e| DsError::InvalidServerConfiguration(e.to_string()))?;
        debug!(%base_url, has_session = session_id.is_some(), "configuring API client");
        *self.config.write().await = Some(ClientConfig {
            base_url,
            session_id,
        });
        Ok(())
    }

    /// Drops the server binding and in-memory session token
    pub async fn clear_configuration(&self) {
        *self.config.write().await = None;
    }

    /// Whether a server binding is currently present
    pub async fn is_configured(&self) -> bool {
        self.config.read().await.is_some()
    }

    /// Snapshot of the current binding; requests run entirely against it
    async fn snapshot(&self) -> Result<ClientConfig, DsError> {
        self.config
            .read()
            .await
            .clone()
            .ok_or(DsError::NotAuthenticated)
    }

    /// Builds the endpoint URL with api dispatch params, caller params,
    /// and the session token
    fn build_url(
        config: &ClientConfig,
        endpoint: &str,
        api: &str,
        method: &str,
        version: u8,
        params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Url, DsError> {
        let mut url = config
            .base_url
            .join(endpoint)
            .map_err(|e| DsError::InvalidServerConfiguration(e.to_string()))?;

        let version = version.to_string();
        let mut pairs: Vec<(&str, &str)> = vec![
            ("api", api),
            ("version", version.as_str()),
            ("method", method),
        ];
        pairs.extend_from_slice(params);

        let sid;
        if authenticated {
            match &config.session_id {
                Some(session_id) => {
                    sid = session_id.to_string();
                    pairs.push(("_sid", sid.as_str()));
                }
                None => return Err(DsError::NotAuthenticated),
            }
        }

        url.set_query(Some(&form::encode_pairs(pairs)));
        Ok(url)
    }

    fn map_transport_error(err: TransportError) -> DsError {
        match err {
            TransportError::InvalidUrl(detail) => DsError::InvalidServerConfiguration(detail),
            TransportError::Http { status } if status >= 500 => DsError::ServerUnreachable,
            TransportError::Http { status } => DsError::Api {
                code: i32::from(status),
                message: format!("HTTP status {status}"),
            },
            TransportError::Timeout => DsError::Timeout,
            TransportError::NoConnection => DsError::NoConnection,
            TransportError::Ssl(_) => DsError::ServerUnreachable,
            TransportError::Cancelled => DsError::Cancelled,
            TransportError::InvalidResponse(_) => DsError::InvalidResponse,
        }
    }

    /// Decodes the envelope; `success == false` always becomes an error
    fn unwrap_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>, DsError> {
        let envelope: Envelope<T> = serde_json::from_slice(bytes)
            .map_err(|e| DsError::DecodingFailed(e.to_string()))?;
        if !envelope.success {
            return match envelope.error {
                Some(body) => {
                    warn!(code = body.code, "API call failed");
                    Err(map_api_error(body.code, body.description))
                }
                None => Err(DsError::InvalidResponse),
            };
        }
        Ok(envelope.data)
    }

    /// Authenticated GET expecting a data payload
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        api: &str,
        method: &str,
        version: u8,
        params: &[(&str, &str)],
    ) -> Result<T, DsError> {
        let config = self.snapshot().await?;
        let url = Self::build_url(&config, endpoint, api, method, version, params, true)?;
        let bytes = self
            .transport
            .get(url)
            .await
            .map_err(Self::map_transport_error)?;
        Self::unwrap_envelope::<T>(&bytes)?.ok_or(DsError::InvalidResponse)
    }

    /// Authenticated GET for operations whose success carries no payload
    pub async fn exec(
        &self,
        endpoint: &str,
        api: &str,
        method: &str,
        version: u8,
        params: &[(&str, &str)],
    ) -> Result<(), DsError> {
        let config = self.snapshot().await?;
        let url = Self::build_url(&config, endpoint, api, method, version, params, true)?;
        let bytes = self
            .transport
            .get(url)
            .await
            .map_err(Self::map_transport_error)?;
        Self::unwrap_envelope::<serde_json::Value>(&bytes)?;
        Ok(())
    }

    /// Authenticated multipart POST with one file part; the api dispatch
    /// params travel as form fields, the session token stays in the query
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        api: &str,
        method: &str,
        version: u8,
        fields: Vec<(String, String)>,
        file: MultipartFile,
    ) -> Result<Option<T>, DsError> {
        let config = self.snapshot().await?;
        let url = Self::build_url(&config, endpoint, api, method, version, &[], true)?;

        let mut all_fields = vec![
            ("api".to_string(), api.to_string()),
            ("version".to_string(), version.to_string()),
            ("method".to_string(), method.to_string()),
        ];
        all_fields.extend(fields);

        let bytes = self
            .transport
            .post_multipart(url, all_fields, file)
            .await
            .map_err(Self::map_transport_error)?;
        Self::unwrap_envelope::<T>(&bytes)
    }

    /// Unauthenticated GET against an explicit server, for the login
    /// handshake that happens before any session token exists
    pub async fn fetch_unauthenticated<T: DeserializeOwned>(
        &self,
        server: &ServerConfiguration,
        endpoint: &str,
        api: &str,
        method: &str,
        version: u8,
        params: &[(&str, &str)],
    ) -> Result<T, DsError> {
        server.validate()?;
        let base_url = Url::parse(&server.base_url())
            .map_err(|e| DsError::InvalidServerConfiguration(e.to_string()))?;
        let config = ClientConfig {
            base_url,
            session_id: None,
        };
        let url = Self::build_url(&config, endpoint, api, method, version, params, false)?;
        let bytes = self
            .transport
            .get(url)
            .await
            .map_err(Self::map_transport_error)?;
        Self::unwrap_envelope::<T>(&bytes)?.ok_or(DsError::InvalidResponse)
    }
}

// ============================================================================
// Tests
// ============================================================================
