//! Download task use case
//!
//! Listing, creation, and lifecycle control of download tasks. Reads go
//! through the cache-aware task repository; every mutation invalidates the
//! cached task list inside the repository.

use std::sync::Arc;

use tracing::debug;

use crate::{
    domain::{CreateTaskRequest, DsError, DownloadTask, Statistics, TaskId},
    ports::{Cached, ITaskRepository},
};

/// Use case for download task operations
pub struct TaskUseCase {
    task_repository: Arc<dyn ITaskRepository>,
}

impl TaskUseCase {
    /// Creates a new TaskUseCase with the required dependencies
    pub fn new(task_repository: Arc<dyn ITaskRepository>) -> Self {
        Self { task_repository }
    }

    /// Returns the task list, cache-first unless `force_refresh` is set
    pub async fn get_tasks(
        &self,
        force_refresh: bool,
    ) -> Result<Cached<Vec<DownloadTask>>, DsError> {
        self.task_repository.get_tasks(force_refresh).await
    }

    /// Submits a new download task from a URI or an uploaded torrent file
    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<(), DsError> {
        request.validate()?;
        debug!(destination = ?request.destination, "creating download task");
        self.task_repository.create_task(request).await
    }

    /// Pauses the given tasks
    pub async fn pause_tasks(&self, ids: &[TaskId]) -> Result<(), DsError> {
        Self::require_ids(ids)?;
        self.task_repository.pause_tasks(ids).await
    }

    /// Resumes the given tasks
    pub async fn resume_tasks(&self, ids: &[TaskId]) -> Result<(), DsError> {
        Self::require_ids(ids)?;
        self.task_repository.resume_tasks(ids).await
    }

    /// Deletes the given tasks
    pub async fn delete_tasks(&self, ids: &[TaskId]) -> Result<(), DsError> {
        Self::require_ids(ids)?;
        self.task_repository.delete_tasks(ids).await
    }

    /// Moves the given tasks to another destination folder
    pub async fn edit_task_destination(
        &self,
        ids: &[TaskId],
        destination: &str,
    ) -> Result<(), DsError> {
        Self::require_ids(ids)?;
        if destination.trim().is_empty() {
            return Err(DsError::InvalidInput(
                "Destination must not be empty".to_string(),
            ));
        }
        self.task_repository.edit_task_destination(ids, destination).await
    }

    /// Current global transfer statistics, always fetched fresh
    pub async fn statistics(&self) -> Result<Statistics, DsError> {
        self.task_repository.statistics().await
    }

    fn require_ids(ids: &[TaskId]) -> Result<(), DsError> {
        if ids.is_empty() {
            return Err(DsError::InvalidInput(
                "At least one task id is required".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
