//! Domain entities and business logic
//!
//! This module contains the core domain types for dstation:
//! - Newtypes for type-safe entity identifiers
//! - Server configuration and session types
//! - Download task, RSS feed, and File Station entities
//! - The closed domain error taxonomy

pub mod errors;
pub mod feed;
pub mod filestation;
pub mod newtypes;
pub mod server;
pub mod session;
pub mod task;

// Re-export commonly used types
pub use errors::DsError;
pub use feed::{FeedItemPage, Pagination, RssFeed, RssFeedItem};
pub use filestation::{FileSystemItem, SharedFolder};
pub use newtypes::{FeedId, FeedItemId, SessionId, TaskId};
pub use server::ServerConfiguration;
pub use session::{Credentials, Session, DEFAULT_SESSION_MAX_AGE_HOURS};
pub use task::{CreateTaskRequest, DownloadTask, Statistics, TaskStatus, TorrentFile};
