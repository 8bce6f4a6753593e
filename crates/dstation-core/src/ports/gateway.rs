//! Station gateway port (driven/secondary port)
//!
//! Interface for every remote operation against the NAS web API. The adapter
//! implementation handles envelope decoding, session token attachment, and
//! error-code mapping; this trait already speaks domain types and the closed
//! [`DsError`] taxonomy — no transport-specific error ever crosses it.
//!
//! ## Design Notes
//!
//! - Gateway methods return `Result<_, DsError>` (not `anyhow`): the error
//!   taxonomy carries category metadata the repository layer needs for its
//!   cache-fallback and re-login decisions.
//! - `configure` rebinds the gateway to a server + token and must be atomic
//!   with respect to concurrent in-flight requests.

use crate::domain::{
    CreateTaskRequest, Credentials, DsError, DownloadTask, FeedId, FeedItemPage, FileSystemItem,
    Pagination, RssFeed, ServerConfiguration, SessionId, SharedFolder, Statistics, TaskId,
};

/// Port trait for remote NAS API operations
#[async_trait::async_trait]
pub trait IStationGateway: Send + Sync {
    /// Rebinds the gateway to a server and optional session token.
    ///
    /// Safe to call concurrently with in-flight requests: a running request
    /// observes either the old or the new binding in full, never a mix.
    ///
    /// Fails with [`DsError::InvalidServerConfiguration`] when the server
    /// parameters do not validate, leaving the previous binding in place.
    async fn configure(
        &self,
        server: &ServerConfiguration,
        session: Option<SessionId>,
    ) -> Result<(), DsError>;

    /// Drops the current server binding (used on logout)
    async fn clear_configuration(&self);

    /// Performs the unauthenticated login handshake and returns the session
    /// token. Does not change the gateway binding.
    async fn login(
        &self,
        server: &ServerConfiguration,
        credentials: &Credentials,
    ) -> Result<SessionId, DsError>;

    /// Invalidates the current session on the server
    async fn logout(&self) -> Result<(), DsError>;

    // --- Download tasks ---

    /// Lists all download tasks with transfer details
    async fn list_tasks(&self) -> Result<Vec<DownloadTask>, DsError>;

    /// Creates a download task from a URI or an uploaded torrent file
    async fn create_task(&self, request: &CreateTaskRequest) -> Result<(), DsError>;

    /// Pauses the given tasks
    async fn pause_tasks(&self, ids: &[TaskId]) -> Result<(), DsError>;

    /// Resumes the given tasks
    async fn resume_tasks(&self, ids: &[TaskId]) -> Result<(), DsError>;

    /// Deletes the given tasks (keeps downloaded data on the server)
    async fn delete_tasks(&self, ids: &[TaskId]) -> Result<(), DsError>;

    /// Moves the given tasks to a new destination folder
    async fn edit_task_destination(
        &self,
        ids: &[TaskId],
        destination: &str,
    ) -> Result<(), DsError>;

    /// Current server-wide transfer statistics
    async fn statistics(&self) -> Result<Statistics, DsError>;

    // --- RSS feeds ---

    /// Lists all registered RSS feeds
    async fn list_feeds(&self) -> Result<Vec<RssFeed>, DsError>;

    /// Fetches one page of items for a feed; offset/limit are forwarded
    /// verbatim
    async fn list_feed_items(
        &self,
        feed: &FeedId,
        page: Pagination,
    ) -> Result<FeedItemPage, DsError>;

    /// Asks the server to re-poll a feed now
    async fn refresh_feed(&self, feed: &FeedId) -> Result<(), DsError>;

    // --- File Station ---

    /// Lists the top-level shared folders
    async fn list_shares(&self) -> Result<Vec<SharedFolder>, DsError>;

    /// Lists the contents of a folder
    async fn list_folder(&self, path: &str) -> Result<Vec<FileSystemItem>, DsError>;

    /// Creates a folder under `parent` and returns the created entry
    async fn create_folder(&self, parent: &str, name: &str)
        -> Result<FileSystemItem, DsError>;
}
