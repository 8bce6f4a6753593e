//! RSS feed entities
//!
//! The top-level feed list is the cached collection; feed items are always
//! fetched fresh with offset/limit pagination and never enter the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DsError;
use super::newtypes::FeedId;

/// An RSS feed registered on the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssFeed {
    /// Server-assigned feed identifier
    pub id: FeedId,
    /// Feed title
    pub title: String,
    /// Feed source URL
    pub url: String,
    /// When the server last polled the feed
    pub last_update: Option<DateTime<Utc>>,
}

/// A single item within an RSS feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RssFeedItem {
    /// Item title
    pub title: String,
    /// Download link for the item
    pub link: String,
    /// When the item was published
    pub published: Option<DateTime<Utc>>,
}

/// Offset/limit window for feed item queries, forwarded verbatim to the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Index of the first item to return
    pub offset: u32,
    /// Maximum number of items to return
    pub limit: u32,
}

impl Pagination {
    /// Creates a validated pagination window.
    ///
    /// # Errors
    /// Returns `DsError::InvalidInput` if the limit is 0.
    pub fn new(offset: u32, limit: u32) -> Result<Self, DsError> {
        if limit == 0 {
            return Err(DsError::InvalidInput(
                "Pagination limit must be at least 1".to_string(),
            ));
        }
        Ok(Self { offset, limit })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// One page of feed items plus the server-reported total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItemPage {
    /// Items in this window
    pub items: Vec<RssFeedItem>,
    /// Total item count on the server
    pub total: u32,
    /// Offset this page was fetched at
    pub offset: u32,
}
