//! Task repository
//!
//! Cache-first reads of the download task list with offline fallback, and
//! mutations that always hit the network and invalidate the cached list on
//! success. Every remote call runs under the bounded session-expiry retry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use dstation_core::domain::{CreateTaskRequest, DownloadTask, DsError, Statistics, TaskId};
use dstation_core::ports::{Cached, IConnectivityMonitor, IStationGateway, ITaskRepository};

use crate::memory::{CacheKey, MemoryCache};
use crate::retry::{with_session_retry, SessionRefresher};

/// [`ITaskRepository`] over gateway, cache, and connectivity monitor
pub struct TaskRepository {
    gateway: Arc<dyn IStationGateway>,
    cache: Arc<MemoryCache>,
    connectivity: Arc<dyn IConnectivityMonitor>,
    refresher: Arc<dyn SessionRefresher>,
}

impl TaskRepository {
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

    /// Runs a mutation and invalidates the cached task list on success
    async fn mutate<F, Fut>(&self, operation: F) -> Result<(), DsError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<(), DsError>>,
    {
        with_session_retry(self.refresher.as_ref(), operation).await?;
        self.cache.invalidate(CacheKey::Tasks).await;
        Ok(())
    }
}

#[async_trait]
impl ITaskRepository for TaskRepository {
    async fn get_tasks(&self, force_refresh: bool) -> Result<Cached<Vec<DownloadTask>>, DsError> {
        if !force_refresh {
            if let Some(tasks) = self.cache.get_tasks().await {
                debug!(count = tasks.len(), "serving task list from cache");
                return Ok(Cached::from_cache(tasks));
            }
        }

        if !self.connectivity.is_connected().await {
            if let Some(tasks) = self.cache.get_tasks().await {
                debug!("offline, falling back to cached task list");
                return Ok(Cached::from_cache(tasks));
            }
            return Err(DsError::NoConnection);
        }

        let result =
            with_session_retry(self.refresher.as_ref(), || self.gateway.list_tasks()).await;
        match result {
            Ok(tasks) => {
                self.cache.set_tasks(tasks.clone()).await;
                Ok(Cached::fresh(tasks))
            }
            Err(err) if err.can_use_cache_fallback() => {
                if let Some(tasks) = self.cache.get_tasks().await {
                    debug!(error = %err, "fetch failed, serving cached task list");
                    return Ok(Cached::from_cache(tasks));
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<(), DsError> {
        self.mutate(|| self.gateway.create_task(request)).await
    }

    async fn pause_tasks(&self, ids: &[TaskId]) -> Result<(), DsError> {
        self.mutate(|| self.gateway.pause_tasks(ids)).await
    }

    async fn resume_tasks(&self, ids: &[TaskId]) -> Result<(), DsError> {
        self.mutate(|| self.gateway.resume_tasks(ids)).await
    }

    async fn delete_tasks(&self, ids: &[TaskId]) -> Result<(), DsError> {
        self.mutate(|| self.gateway.delete_tasks(ids)).await
    }

    async fn edit_task_destination(
        &self,
        ids: &[TaskId],
        destination: &str,
    ) -> Result<(), DsError> {
        self.mutate(|| self.gateway.edit_task_destination(ids, destination))
            .await
    }

    async fn statistics(&self) -> Result<Statistics, DsError> {
        with_session_retry(self.refresher.as_ref(), || self.gateway.statistics()).await
    }
}
