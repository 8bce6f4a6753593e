//! File Station repository
//!
//! Remote filesystem browsing is never cached: destination pickers must
//! reflect what is on the server right now. Every call still runs under the
//! bounded session-expiry retry.

use std::sync::Arc;

use async_trait::async_trait;

use dstation_core::domain::{DsError, FileSystemItem, SharedFolder};
use dstation_core::ports::{IFileStationRepository, IStationGateway};

use crate::retry::{with_session_retry, SessionRefresher};

/// [`IFileStationRepository`] over the gateway
pub struct FileStationRepository {
    gateway: Arc<dyn IStationGateway>,
    refresher: Arc<dyn SessionRefresher>,
}

impl FileStationRepository {
    pub fn new(gateway: Arc<dyn IStationGateway>, refresher: Arc<dyn SessionRefresher>) -> Self {
        Self { gateway, refresher }
    }
}

#[async_trait]
impl IFileStationRepository for FileStationRepository {
    async fn get_shares(&self) -> Result<Vec<SharedFolder>, DsError> {
        with_session_retry(self.refresher.as_ref(), || self.gateway.list_shares()).await
    }

    async fn get_folder_contents(&self, path: &str) -> Result<Vec<FileSystemItem>, DsError> {
        with_session_retry(self.refresher.as_ref(), || self.gateway.list_folder(path)).await
    }

    async fn create_folder(
        &self,
        parent: &str,
        name: &str,
    ) -> Result<FileSystemItem, DsError> {
        with_session_retry(self.refresher.as_ref(), || {
            self.gateway.create_folder(parent, name)
        })
        .await
    }
}
