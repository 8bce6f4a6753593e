//! Repository ports (cache-aware entity access)
//!
//! Repositories orchestrate the cache store, the station gateway, and the
//! connectivity monitor per entity type. They implement cache-first reads
//! with offline fallback, write-invalidation after mutations, and the single
//! bounded re-login retry on session expiry. Use cases call exactly one
//! repository method each.

use crate::domain::{
    CreateTaskRequest, Credentials, DsError, DownloadTask, FeedId, FeedItemPage, FileSystemItem,
    Pagination, RssFeed, ServerConfiguration, Session, SharedFolder, Statistics, TaskId,
};

/// A value plus its provenance: served from cache or fetched fresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached<T> {
    /// The payload
    pub value: T,
    /// True when served from the in-memory cache without a network call
    pub is_from_cache: bool,
}

impl<T> Cached<T> {
    /// Wraps a value served from cache
    pub fn from_cache(value: T) -> Self {
        Self {
            value,
            is_from_cache: true,
        }
    }

    /// Wraps a value fetched fresh from the server
    pub fn fresh(value: T) -> Self {
        Self {
            value,
            is_from_cache: false,
        }
    }
}

/// Authentication and session lifecycle
#[async_trait::async_trait]
pub trait IAuthRepository: Send + Sync {
    /// Logs in, persists session + credentials, and configures the gateway
    async fn login(
        &self,
        server: ServerConfiguration,
        credentials: Credentials,
    ) -> Result<Session, DsError>;

    /// Best-effort remote logout followed by unconditional local erasure.
    /// Never fails to clear local state because of a network error.
    async fn logout(&self) -> Result<(), DsError>;

    /// Loads the stored session, proactively refreshing it when the age
    /// heuristic flags it, and configures the gateway with the result
    async fn validate_session(&self) -> Result<Session, DsError>;

    /// Re-login with stored credentials; used proactively by
    /// `validate_session` and reactively after a `SessionExpired` error
    async fn refresh_session(&self) -> Result<Session, DsError>;
}

/// Download task access with a cached task-list slot
#[async_trait::async_trait]
pub trait ITaskRepository: Send + Sync {
    /// Cache-first task list; `force_refresh` bypasses the cache
    async fn get_tasks(&self, force_refresh: bool) -> Result<Cached<Vec<DownloadTask>>, DsError>;

    /// Creates a task and invalidates the task-list cache
    async fn create_task(&self, request: &CreateTaskRequest) -> Result<(), DsError>;

    /// Pauses tasks and invalidates the task-list cache
    async fn pause_tasks(&self, ids: &[TaskId]) -> Result<(), DsError>;

    /// Resumes tasks and invalidates the task-list cache
    async fn resume_tasks(&self, ids: &[TaskId]) -> Result<(), DsError>;

    /// Deletes tasks and invalidates the task-list cache
    async fn delete_tasks(&self, ids: &[TaskId]) -> Result<(), DsError>;

    /// Moves tasks to a new destination and invalidates the task-list cache
    async fn edit_task_destination(
        &self,
        ids: &[TaskId],
        destination: &str,
    ) -> Result<(), DsError>;

    /// Current transfer statistics; never cached
    async fn statistics(&self) -> Result<Statistics, DsError>;
}

/// RSS feed access with a cached feed-list slot
#[async_trait::async_trait]
pub trait IFeedRepository: Send + Sync {
    /// Cache-first feed list; `force_refresh` bypasses the cache
    async fn get_feeds(&self, force_refresh: bool) -> Result<Cached<Vec<RssFeed>>, DsError>;

    /// One page of feed items; never cached, pagination forwarded verbatim
    async fn get_feed_items(
        &self,
        feed: &FeedId,
        page: Pagination,
    ) -> Result<FeedItemPage, DsError>;

    /// Asks the server to re-poll a feed; invalidates the feed-list cache
    async fn refresh_feed(&self, feed: &FeedId) -> Result<(), DsError>;
}

/// File Station browsing; nothing here is cached
#[async_trait::async_trait]
pub trait IFileStationRepository: Send + Sync {
    /// Lists the top-level shared folders
    async fn get_shares(&self) -> Result<Vec<SharedFolder>, DsError>;

    /// Lists the contents of a folder
    async fn get_folder_contents(&self, path: &str) -> Result<Vec<FileSystemItem>, DsError>;

    /// Creates a folder and returns the created entry
    async fn create_folder(&self, parent: &str, name: &str)
        -> Result<FileSystemItem, DsError>;
}
