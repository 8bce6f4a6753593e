//! Download task entities
//!
//! Immutable value objects produced by mapping the Download Station task
//! DTOs. Updates are whole-value replacements; nothing here is patched in
//! place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DsError;
use super::newtypes::TaskId;

/// Lifecycle state of a download task as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Waiting,
    Downloading,
    Paused,
    Finishing,
    Finished,
    HashChecking,
    Seeding,
    FilehostingWaiting,
    Extracting,
    Error,
    /// A status string this client does not know about
    Unknown(String),
}

impl TaskStatus {
    /// Maps the raw status string from the task list API
    #[must_use]
    pub fn from_api_str(s: &str) -> Self {
        match s {
            "waiting" => Self::Waiting,
            "downloading" => Self::Downloading,
            "paused" => Self::Paused,
            "finishing" => Self::Finishing,
            "finished" => Self::Finished,
            "hash_checking" => Self::HashChecking,
            "seeding" => Self::Seeding,
            "filehosting_waiting" => Self::FilehostingWaiting,
            "extracting" => Self::Extracting,
            "error" => Self::Error,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// True for states where the transfer is still making progress
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::Waiting | Self::Downloading | Self::Finishing | Self::HashChecking
        )
    }

    /// The raw API wording for this status
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Waiting => "waiting",
            Self::Downloading => "downloading",
            Self::Paused => "paused",
            Self::Finishing => "finishing",
            Self::Finished => "finished",
            Self::HashChecking => "hash_checking",
            Self::Seeding => "seeding",
            Self::FilehostingWaiting => "filehosting_waiting",
            Self::Extracting => "extracting",
            Self::Error => "error",
            Self::Unknown(other) => other,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single download task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadTask {
    /// Server-assigned task identifier
    pub id: TaskId,
    /// Display title (usually the file name)
    pub title: String,
    /// Current lifecycle state
    pub status: TaskStatus,
    /// Total size in bytes (0 while the size is still unknown)
    pub size_bytes: u64,
    /// Bytes downloaded so far
    pub size_downloaded: u64,
    /// Bytes uploaded so far (seeding)
    pub size_uploaded: u64,
    /// Current download speed in bytes/s
    pub speed_download: u64,
    /// Current upload speed in bytes/s
    pub speed_upload: u64,
    /// Account that created the task
    pub username: Option<String>,
    /// Destination share/folder on the server
    pub destination: Option<String>,
    /// Source URI the task was created from
    pub uri: Option<String>,
    /// When the task was created on the server
    pub created_at: Option<DateTime<Utc>>,
}

impl DownloadTask {
    /// Download progress in percent, clamped to 0..=100.
    ///
    /// Returns 0.0 while the total size is unknown.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.size_bytes == 0 {
            return 0.0;
        }
        (self.size_downloaded as f64 / self.size_bytes as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Source for a new download task: exactly one of URI or torrent file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    /// Download URI (HTTP/FTP/magnet) to hand to the server
    pub uri: Option<String>,
    /// Torrent file to upload with the request
    pub file: Option<TorrentFile>,
    /// Destination share/folder; server default when absent
    pub destination: Option<String>,
}

/// An in-memory torrent file to submit via multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentFile {
    /// File name reported in the multipart part
    pub name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl CreateTaskRequest {
    /// Creates a request from a download URI
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            file: None,
            destination: None,
        }
    }

    /// Creates a request from an in-memory torrent file
    pub fn from_file(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            uri: None,
            file: Some(TorrentFile {
                name: name.into(),
                bytes,
            }),
            destination: None,
        }
    }

    /// Sets the destination share/folder
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Validates that exactly one source is present and non-empty
    pub fn validate(&self) -> Result<(), DsError> {
        match (&self.uri, &self.file) {
            (Some(uri), None) if !uri.trim().is_empty() => Ok(()),
            (Some(_), None) => Err(DsError::InvalidInput(
                "Download URI must not be empty".to_string(),
            )),
            (None, Some(file)) if !file.bytes.is_empty() => Ok(()),
            (None, Some(_)) => Err(DsError::InvalidInput(
                "Torrent file must not be empty".to_string(),
            )),
            (Some(_), Some(_)) => Err(DsError::InvalidInput(
                "Provide either a URI or a file, not both".to_string(),
            )),
            (None, None) => Err(DsError::InvalidInput(
                "A URI or a torrent file is required".to_string(),
            )),
        }
    }
}

/// Server-wide transfer statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Aggregate download speed in bytes/s
    pub speed_download: u64,
    /// Aggregate upload speed in bytes/s
    pub speed_upload: u64,
}
