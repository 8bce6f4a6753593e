//! File Station entities
//!
//! Shares and folder listings are browse-only views used when picking a
//! download destination; they are never cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level shared folder on the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedFolder {
    /// Share name
    pub name: String,
    /// Absolute path, e.g. "/downloads"
    pub path: String,
}

/// A file or directory inside a share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystemItem {
    /// Entry name
    pub name: String,
    /// Absolute path on the server
    pub path: String,
    /// Whether the entry is a directory
    pub is_directory: bool,
    /// Size in bytes; None for directories
    pub size: Option<u64>,
    /// Last modification time
    pub modified: Option<DateTime<Utc>>,
}
