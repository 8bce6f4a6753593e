//! Feed repository
//!
//! The feed list follows the same cache-first algorithm as tasks. Item
//! pages are never cached: they change on every server-side poll and the
//! offset/limit travel through verbatim. A server-side refresh counts as a
//! mutation of the feed list.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use dstation_core::domain::{DsError, FeedId, FeedItemPage, Pagination, RssFeed};
use dstation_core::ports::{Cached, IConnectivityMonitor, IFeedRepository, IStationGateway};

use crate::memory::{CacheKey, MemoryCache};
use crate::retry::{with_session_retry, SessionRefresher};

/// [`IFeedRepository`] over gateway, cache, and connectivity monitor
pub struct FeedRepository {
    gateway: Arc<dyn IStationGateway>,
    cache: Arc<MemoryCache>,
    connectivity: Arc<dyn IConnectivityMonitor>,
    refresher: Arc<dyn SessionRefresher>,
}

impl FeedRepository {
    pub fn new(
        gateway: Arc<dyn IStationGateway>,
        cache: Arc<MemoryCache>,
        connectivity: Arc<dyn IConnectivityMonitor>,
        refresher: Arc<dyn SessionRefresher>,
    ) -> Self {
        Self {
            gateway,
            cache,
            connectivity,
            refresher,
        }
    }
}

#[async_trait]
impl IFeedRepository for FeedRepository {
    async fn get_feeds(&self, force_refresh: bool) -> Result<Cached<Vec<RssFeed>>, DsError> {
        if !force_refresh {
            if let Some(feeds) = self.cache.get_feeds().await {
                debug!(count = feeds.len(), "serving feed list from cache");
                return Ok(Cached::from_cache(feeds));
            }
        }

        if !self.connectivity.is_connected().await {
            if let Some(feeds) = self.cache.get_feeds().await {
                debug!("offline, falling back to cached feed list");
                return Ok(Cached::from_cache(feeds));
            }
            return Err(DsError::NoConnection);
        }

        let result =
            with_session_retry(self.refresher.as_ref(), || self.gateway.list_feeds()).await;
        match result {
            Ok(feeds) => {
                self.cache.set_feeds(feeds.clone()).await;
                Ok(Cached::fresh(feeds))
            }
            Err(err) if err.can_use_cache_fallback() => {
                if let Some(feeds) = self.cache.get_feeds().await {
                    debug!(error = %err, "fetch failed, serving cached feed list");
                    return Ok(Cached::from_cache(feeds));
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    async fn get_feed_items(
        &self,
        feed: &FeedId,
        page: Pagination,
    ) -> Result<FeedItemPage, DsError> {
        with_session_retry(self.refresher.as_ref(), || {
            self.gateway.list_feed_items(feed, page)
        })
        .await
    }

    async fn refresh_feed(&self, feed: &FeedId) -> Result<(), DsError> {
        with_session_retry(self.refresher.as_ref(), || self.gateway.refresh_feed(feed)).await?;
        self.cache.invalidate(CacheKey::Feeds).await;
        Ok(())
    }
}
