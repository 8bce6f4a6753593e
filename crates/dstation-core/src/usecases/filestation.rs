//! File Station use case
//!
//! Remote filesystem browsing, used to pick and create download destination
//! folders. Nothing here is cached; the view must reflect the server.

use std::sync::Arc;

use crate::{
    domain::{DsError, FileSystemItem, SharedFolder},
    ports::IFileStationRepository,
};

/// Use case for remote filesystem operations
pub struct FileStationUseCase {
    file_repository: Arc<dyn IFileStationRepository>,
}

impl FileStationUseCase {
    /// Creates a new FileStationUseCase with the required dependencies
    pub fn new(file_repository: Arc<dyn IFileStationRepository>) -> Self {
        Self { file_repository }
    }

    /// Lists the top-level shared folders
    pub async fn get_shares(&self) -> Result<Vec<SharedFolder>, DsError> {
        self.file_repository.get_shares().await
    }

    /// Lists the contents of a folder by absolute path
    pub async fn get_folder_contents(&self, path: &str) -> Result<Vec<FileSystemItem>, DsError> {
        Self::require_path(path)?;
        self.file_repository.get_folder_contents(path).await
    }

    /// Creates a new folder inside `parent` and returns the created entry
    pub async fn create_folder(
        &self,
        parent: &str,
        name: &str,
    ) -> Result<FileSystemItem, DsError> {
        Self::require_path(parent)?;
        if name.trim().is_empty() || name.contains('/') {
            return Err(DsError::InvalidInput(format!(
                "Invalid folder name '{name}'"
            )));
        }
        self.file_repository.create_folder(parent, name).await
    }

    fn require_path(path: &str) -> Result<(), DsError> {
        if !path.starts_with('/') {
            return Err(DsError::InvalidInput(format!(
                "Path must be absolute, got '{path}'"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
