//! In-memory cache store
//!
//! One slot per cached collection, process-lifetime only. No TTL machinery:
//! staleness is a caller decision carried by the `force_refresh` flag.
//! Slots are whole-value replacements behind an async RwLock, so concurrent
//! readers see either the old or the new list in full, never a torn mix.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use dstation_core::domain::{DownloadTask, RssFeed};

/// The cached collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey {
    /// The download task list
    Tasks,
    /// The registered RSS feed list
    Feeds,
}

/// A cached collection with the time it was stored
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    stored_at: DateTime<Utc>,
}

impl<T: Clone> CacheEntry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            stored_at: Utc::now(),
        }
    }
}

/// Per-collection in-memory cache
#[derive(Default)]
pub struct MemoryCache {
    tasks: RwLock<Option<CacheEntry<Vec<DownloadTask>>>>,
    feeds: RwLock<Option<CacheEntry<Vec<RssFeed>>>>,
}

impl MemoryCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached task list, if populated
    pub async fn get_tasks(&self) -> Option<Vec<DownloadTask>> {
        self.tasks.read().await.as_ref().map(|e| e.value.clone())
    }

    /// Stores the task list, replacing any previous entry whole
    pub async fn set_tasks(&self, tasks: Vec<DownloadTask>) {
        *self.tasks.write().await = Some(CacheEntry::new(tasks));
    }

    /// Cached feed list, if populated
    pub async fn get_feeds(&self) -> Option<Vec<RssFeed>> {
        self.feeds.read().await.as_ref().map(|e| e.value.clone())
    }

    /// Stores the feed list, replacing any previous entry whole
    pub async fn set_feeds(&self, feeds: Vec<RssFeed>) {
        *self.feeds.write().await = Some(CacheEntry::new(feeds));
    }

    /// When the given collection was last stored
    pub async fn stored_at(&self, key: CacheKey) -> Option<DateTime<Utc>> {
        match key {
            CacheKey::Tasks => self.tasks.read().await.as_ref().map(|e| e.stored_at),
            CacheKey::Feeds => self.feeds.read().await.as_ref().map(|e| e.stored_at),
        }
    }

    /// Discards one collection so the next read forces a network fetch
    pub async fn invalidate(&self, key: CacheKey) {
        match key {
            CacheKey::Tasks => *self.tasks.write().await = None,
            CacheKey::Feeds => *self.feeds.write().await = None,
        }
    }

    /// Discards everything (used on logout)
    pub async fn clear_all(&self) {
        self.invalidate(CacheKey::Tasks).await;
        self.invalidate(CacheKey::Feeds).await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dstation_core::domain::{FeedId, TaskId, TaskStatus};

    fn task(id: &str) -> DownloadTask {
        DownloadTask {
            id: TaskId::new(id.to_string()).unwrap(),
            title: id.to_string(),
            status: TaskStatus::Waiting,
            size_bytes: 0,
            size_downloaded: 0,
            size_uploaded: 0,
            speed_download: 0,
            speed_upload: 0,
            username: None,
            destination: None,
            uri: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_set_then_get_returns_whole_value() {
        let cache = MemoryCache::new();
        assert!(cache.get_tasks().await.is_none());

        cache.set_tasks(vec![task("dbid_1"), task("dbid_2")]).await;
        let tasks = cache.get_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(cache.stored_at(CacheKey::Tasks).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_only_touches_its_key() {
        let cache = MemoryCache::new();
        cache.set_tasks(vec![task("dbid_1")]).await;
        cache
            .set_feeds(vec![RssFeed {
                id: FeedId::new("1".to_string()).unwrap(),
                title: "a".to_string(),
                url: "https://example.org/rss".to_string(),
                last_update: None,
            }])
            .await;

        cache.invalidate(CacheKey::Tasks).await;
        assert!(cache.get_tasks().await.is_none());
        assert!(cache.get_feeds().await.is_some());
    }

    #[tokio::test]
    async fn test_concurrent_reads_see_whole_generations_only() {
        use std::sync::Arc;

        let cache = Arc::new(MemoryCache::new());
        cache.set_tasks(vec![task("dbid_1"), task("dbid_2")]).await;

        // Writer flips between two full generations; a reader must see one
        // of them in its entirety, never a mix or a partial list
        let writer = {
            let cache = cache.clone();
            tokio::spawn(async move {
                for round in 0..200 {
                    if round % 2 == 0 {
                        cache.set_tasks(vec![task("dbid_3")]).await;
                    } else {
                        cache.set_tasks(vec![task("dbid_1"), task("dbid_2")]).await;
                    }
                    tokio::task::yield_now().await;
                }
            })
        };

        let reader = {
            let cache = cache.clone();
            tokio::spawn(async move {
                for _ in 0..200 {
                    let tasks = cache.get_tasks().await.unwrap();
                    let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
                    assert!(
                        ids == ["dbid_1", "dbid_2"] || ids == ["dbid_3"],
                        "torn read: {ids:?}"
                    );
                    tokio::task::yield_now().await;
                }
            })
        };

        writer.await.unwrap();
        reader.await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_all_empties_every_slot() {
        let cache = MemoryCache::new();
        cache.set_tasks(vec![task("dbid_1")]).await;
        cache.clear_all().await;
        assert!(cache.get_tasks().await.is_none());
        assert!(cache.get_feeds().await.is_none());
    }
}
