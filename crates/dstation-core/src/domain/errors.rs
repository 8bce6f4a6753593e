//! Domain error taxonomy
//!
//! A closed, kind-tagged union covering every failure the layers above the
//! transport can observe. Callers match exhaustively instead of inspecting
//! wrapped exceptions, and presentation layers read the category metadata
//! (`requires_relogin`, `is_connectivity_error`, `can_use_cache_fallback`,
//! `is_recoverable`) instead of re-deriving semantics from variants.

use thiserror::Error;

use super::newtypes::{FeedId, TaskId};

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DsError {
    // --- Authentication ---
    /// No valid session is available
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The server rejected the supplied username/password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The server reported the session token as expired (API code 105)
    #[error("Session expired")]
    SessionExpired,

    /// The account requires a one-time password (API code 403)
    #[error("OTP code required")]
    OtpRequired,

    /// The supplied one-time password was rejected (API code 404)
    #[error("OTP code invalid")]
    OtpInvalid,

    /// An automatic re-login with stored credentials failed
    #[error("Re-login failed: {0}")]
    ReloginFailed(String),

    // --- Connectivity ---
    /// No network connection is available
    #[error("No network connection")]
    NoConnection,

    /// The request exceeded its timeout
    #[error("Request timed out")]
    Timeout,

    /// The server could not be reached (TLS failure, 5xx, DNS)
    #[error("Server unreachable")]
    ServerUnreachable,

    /// The stored or supplied server configuration is unusable
    #[error("Invalid server configuration: {0}")]
    InvalidServerConfiguration(String),

    // --- API ---
    /// The server returned an error envelope with an unspecified code
    #[error("API error {code}: {message}")]
    Api {
        /// Raw API error code from the response envelope
        code: i32,
        /// Human-readable description of the code
        message: String,
    },

    /// The response was well-formed HTTP but not a usable envelope
    #[error("Invalid response from server")]
    InvalidResponse,

    /// The response envelope could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    DecodingFailed(String),

    /// An in-flight request was cancelled by the caller
    #[error("Request cancelled")]
    Cancelled,

    // --- Entity-specific ---
    /// The referenced download task does not exist on the server
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// A task operation was accepted but failed for one task
    #[error("Task operation failed for {id}: {reason}")]
    TaskOperationFailed {
        /// The task the operation failed for
        id: TaskId,
        /// Server-reported reason
        reason: String,
    },

    /// The referenced RSS feed does not exist on the server
    #[error("Feed not found: {0}")]
    FeedNotFound(FeedId),

    /// The server failed to refresh the referenced RSS feed
    #[error("Feed refresh failed: {0}")]
    FeedRefreshFailed(FeedId),

    /// No credentials are stored for the given server
    #[error("No stored credentials for server: {0}")]
    ServerCredentialsNotFound(String),

    /// The requested File Station path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// The session lacks permission for the given File Station path
    #[error("Access denied: {0}")]
    AccessDenied(String),

    // --- Cache ---
    /// No cached value exists for the requested collection
    #[error("Cache is empty")]
    CacheEmpty,

    /// The cached value was explicitly marked stale
    #[error("Cache entry expired")]
    CacheExpired,

    // --- Ambient ---
    /// Use-case input validation rejected the request before any network call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The secure session/credential store failed
    #[error("Secure storage error: {0}")]
    Storage(String),
}

impl DsError {
    /// Returns true when the caller should run a full interactive login
    /// before retrying.
    ///
    /// OTP errors are excluded: they require user input, not a session
    /// refresh.
    pub fn requires_relogin(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated
                | Self::InvalidCredentials
                | Self::SessionExpired
                | Self::ReloginFailed(_)
        )
    }

    /// Returns true for errors caused by network unavailability rather than
    /// application logic.
    pub fn is_connectivity_error(&self) -> bool {
        matches!(
            self,
            Self::NoConnection
                | Self::Timeout
                | Self::ServerUnreachable
                | Self::InvalidServerConfiguration(_)
        )
    }

    /// Returns true exactly for the connectivity errors where serving a
    /// previously cached collection is an acceptable fallback.
    pub fn can_use_cache_fallback(&self) -> bool {
        matches!(
            self,
            Self::NoConnection | Self::Timeout | Self::ServerUnreachable
        )
    }

    /// Returns true when retrying the same operation later can succeed
    /// without any change to stored state.
    pub fn is_recoverable(&self) -> bool {
        self.can_use_cache_fallback()
            || matches!(
                self,
                Self::SessionExpired | Self::CacheEmpty | Self::CacheExpired | Self::Cancelled
            )
    }
}
