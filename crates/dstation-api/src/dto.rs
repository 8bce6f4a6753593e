//! Wire types for the Download Station web API
//!
//! These structs mirror the JSON the server actually sends (snake_case
//! fields, unix timestamps, numeric and string IDs) and carry the mapping
//! into the domain entities. Nothing outside this crate sees them.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use dstation_core::domain::{
    DownloadTask, DsError, FeedId, FileSystemItem, RssFeed, RssFeedItem, SharedFolder, Statistics,
    TaskId, TaskStatus,
};

/// Seconds-since-epoch to UTC timestamp; `0` means "never" on this API
fn unix_ts(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

// ============================================================================
// Auth
// ============================================================================

/// `SYNO.API.Auth` login payload
#[derive(Debug, Deserialize)]
pub struct AuthLoginData {
    /// Session token to resubmit as `_sid`
    pub sid: String,
}

// ============================================================================
// Download tasks
// ============================================================================

/// `SYNO.DownloadStation.Task` list payload
#[derive(Debug, Deserialize)]
pub struct TaskListData {
    #[serde(default)]
    pub tasks: Vec<TaskDto>,
}

/// One download task on the wire
#[derive(Debug, Deserialize)]
pub struct TaskDto {
    pub id: String,
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub additional: Option<TaskAdditionalDto>,
}

/// Optional `additional=detail,transfer` sections
#[derive(Debug, Default, Deserialize)]
pub struct TaskAdditionalDto {
    #[serde(default)]
    pub detail: Option<TaskDetailDto>,
    #[serde(default)]
    pub transfer: Option<TaskTransferDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskDetailDto {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub create_time: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskTransferDto {
    #[serde(default)]
    pub size_downloaded: u64,
    #[serde(default)]
    pub size_uploaded: u64,
    #[serde(default)]
    pub speed_download: u64,
    #[serde(default)]
    pub speed_upload: u64,
}

impl TryFrom<TaskDto> for DownloadTask {
    type Error = DsError;

    fn try_from(dto: TaskDto) -> Result<Self, Self::Error> {
        let additional = dto.additional.unwrap_or_default();
        let detail = additional.detail.unwrap_or_default();
        let transfer = additional.transfer.unwrap_or_default();
        Ok(DownloadTask {
            id: TaskId::new(dto.id)?,
            title: dto.title,
            status: TaskStatus::from_api_str(&dto.status),
            size_bytes: dto.size,
            size_downloaded: transfer.size_downloaded,
            size_uploaded: transfer.size_uploaded,
            speed_download: transfer.speed_download,
            speed_upload: transfer.speed_upload,
            username: dto.username,
            destination: detail.destination,
            uri: detail.uri,
            created_at: unix_ts(detail.create_time),
        })
    }
}

/// `SYNO.DownloadStation.Statistic` getinfo payload
#[derive(Debug, Deserialize)]
pub struct StatisticsData {
    #[serde(default)]
    pub speed_download: u64,
    #[serde(default)]
    pub speed_upload: u64,
}

impl From<StatisticsData> for Statistics {
    fn from(dto: StatisticsData) -> Self {
        Statistics {
            speed_download: dto.speed_download,
            speed_upload: dto.speed_upload,
        }
    }
}

// ============================================================================
// RSS feeds
// ============================================================================

/// `SYNO.DownloadStation.RSS.Site` list payload
#[derive(Debug, Deserialize)]
pub struct RssSiteListData {
    #[serde(default)]
    pub sites: Vec<RssSiteDto>,
}

/// One registered feed; the server uses numeric site IDs
#[derive(Debug, Deserialize)]
pub struct RssSiteDto {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub last_update: i64,
}

impl TryFrom<RssSiteDto> for RssFeed {
    type Error = DsError;

    fn try_from(dto: RssSiteDto) -> Result<Self, Self::Error> {
        Ok(RssFeed {
            id: FeedId::new(dto.id.to_string())?,
            title: dto.title,
            url: dto.url,
            last_update: unix_ts(dto.last_update),
        })
    }
}

/// `SYNO.DownloadStation.RSS.Feed` list payload (items of one feed)
#[derive(Debug, Deserialize)]
pub struct RssItemListData {
    #[serde(default)]
    pub items: Vec<RssItemDto>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub struct RssItemDto {
    pub title: String,
    #[serde(rename = "download_uri")]
    pub link: String,
    #[serde(default)]
    pub time: i64,
}

impl From<RssItemDto> for RssFeedItem {
    fn from(dto: RssItemDto) -> Self {
        RssFeedItem {
            title: dto.title,
            link: dto.link,
            published: unix_ts(dto.time),
        }
    }
}

// ============================================================================
// File Station
// ============================================================================

/// `SYNO.FileStation.List` list_share payload
#[derive(Debug, Deserialize)]
pub struct ShareListData {
    #[serde(default)]
    pub shares: Vec<ShareDto>,
}

#[derive(Debug, Deserialize)]
pub struct ShareDto {
    pub name: String,
    pub path: String,
}

impl From<ShareDto> for SharedFolder {
    fn from(dto: ShareDto) -> Self {
        SharedFolder {
            name: dto.name,
            path: dto.path,
        }
    }
}

/// `SYNO.FileStation.List` list payload
#[derive(Debug, Deserialize)]
pub struct FileListData {
    #[serde(default)]
    pub files: Vec<FileDto>,
}

/// `SYNO.FileStation.CreateFolder` payload
#[derive(Debug, Deserialize)]
pub struct CreateFolderData {
    #[serde(default)]
    pub folders: Vec<FileDto>,
}

#[derive(Debug, Deserialize)]
pub struct FileDto {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub isdir: bool,
    #[serde(default)]
    pub additional: Option<FileAdditionalDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileAdditionalDto {
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub time: Option<FileTimeDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileTimeDto {
    #[serde(default)]
    pub mtime: i64,
}

impl From<FileDto> for FileSystemItem {
    fn from(dto: FileDto) -> Self {
        let additional = dto.additional.unwrap_or_default();
        FileSystemItem {
            name: dto.name,
            path: dto.path,
            is_directory: dto.isdir,
            size: if dto.isdir { None } else { additional.size },
            modified: additional.time.and_then(|t| unix_ts(t.mtime)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
