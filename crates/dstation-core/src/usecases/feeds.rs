//! RSS feed use case
//!
//! Feed listing is cache-first; item pages are always fetched live because
//! they change on every server-side poll. A server-side refresh invalidates
//! the cached feed list so the next read picks up new timestamps.

use std::sync::Arc;

use crate::{
    domain::{DsError, FeedId, FeedItemPage, Pagination, RssFeed},
    ports::{Cached, IFeedRepository},
};

/// Use case for RSS feed operations
pub struct FeedUseCase {
    feed_repository: Arc<dyn IFeedRepository>,
}

impl FeedUseCase {
    /// Creates a new FeedUseCase with the required dependencies
    pub fn new(feed_repository: Arc<dyn IFeedRepository>) -> Self {
        Self { feed_repository }
    }

    /// Returns the registered feeds, cache-first unless `force_refresh` is set
    pub async fn get_feeds(&self, force_refresh: bool) -> Result<Cached<Vec<RssFeed>>, DsError> {
        self.feed_repository.get_feeds(force_refresh).await
    }

    /// Returns one page of items for a feed, always fetched live
    pub async fn get_feed_items(
        &self,
        feed: &FeedId,
        page: Pagination,
    ) -> Result<FeedItemPage, DsError> {
        self.feed_repository.get_feed_items(feed, page).await
    }

    /// Asks the server to re-poll the feed now
    pub async fn refresh_feed(&self, feed: &FeedId) -> Result<(), DsError> {
        self.feed_repository.refresh_feed(feed).await
    }
}

// ============================================================================
// Tests
// ============================================================================
