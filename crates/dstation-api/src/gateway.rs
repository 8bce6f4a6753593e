//! Station gateway adapter
//!
//! Implements [`IStationGateway`] over [`DsApiClient`]: picks the endpoint,
//! api name, method, and version for every operation, converts wire DTOs to
//! domain entities, and narrows generic API errors to entity-specific ones
//! where the operation gives them meaning.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use dstation_core::domain::{
    CreateTaskRequest, Credentials, DownloadTask, DsError, FeedId, FeedItemPage, FileSystemItem,
    Pagination, RssFeed, ServerConfiguration, SessionId, SharedFolder, Statistics, TaskId,
};
use dstation_core::ports::IStationGateway;

use crate::client::DsApiClient;
use crate::dto::{
    AuthLoginData, CreateFolderData, FileListData, RssItemListData, RssSiteListData,
    ShareListData, StatisticsData, TaskListData,
};
use crate::transport::{MultipartFile, Transport};

// Endpoints
const AUTH_CGI: &str = "webapi/auth.cgi";
const TASK_CGI: &str = "webapi/DownloadStation/task.cgi";
const STATISTIC_CGI: &str = "webapi/DownloadStation/statistic.cgi";
const RSS_SITE_CGI: &str = "webapi/DownloadStation/RSSsite.cgi";
const RSS_FEED_CGI: &str = "webapi/DownloadStation/RSSfeed.cgi";
const ENTRY_CGI: &str = "webapi/entry.cgi";

// API names
const API_AUTH: &str = "SYNO.API.Auth";
const API_TASK: &str = "SYNO.DownloadStation.Task";
const API_STATISTIC: &str = "SYNO.DownloadStation.Statistic";
const API_RSS_SITE: &str = "SYNO.DownloadStation.RSS.Site";
const API_RSS_FEED: &str = "SYNO.DownloadStation.RSS.Feed";
const API_FS_LIST: &str = "SYNO.FileStation.List";
const API_FS_CREATE_FOLDER: &str = "SYNO.FileStation.CreateFolder";

/// Application session name sent with every auth call
const SESSION_NAME: &str = "DownloadStation";

/// [`IStationGateway`] adapter over the web API
pub struct StationGateway {
    client: DsApiClient,
}

impl StationGateway {
    /// Creates a gateway over the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            client: DsApiClient::new(transport),
        }
    }

    fn join_ids(ids: &[TaskId]) -> String {
        ids.iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Login-context narrowing: the auth API reports bad credentials with
    /// its own 400-range codes
    fn map_login_error(err: DsError) -> DsError {
        match err {
            DsError::Api { code: 400..=402, .. } => DsError::InvalidCredentials,
            other => other,
        }
    }

    /// File-context narrowing for path errors
    fn map_file_error(err: DsError, path: &str) -> DsError {
        match err {
            DsError::Api { code: 408, .. } => DsError::PathNotFound(path.to_string()),
            DsError::Api { code: 407, .. } => DsError::AccessDenied(path.to_string()),
            other => other,
        }
    }
}

#[async_trait]
impl IStationGateway for StationGateway {
    async fn configure(
        &self,
        server: &ServerConfiguration,
        session: Option<SessionId>,
    ) -> Result<(), DsError> {
        self.client.configure(server, session).await
    }

    async fn clear_configuration(&self) {
        self.client.clear_configuration().await;
    }

    async fn login(
        &self,
        server: &ServerConfiguration,
        credentials: &Credentials,
    ) -> Result<SessionId, DsError> {
        let mut params = vec![
            ("account", credentials.username.as_str()),
            ("passwd", credentials.password.as_str()),
            ("session", SESSION_NAME),
            ("format", "sid"),
        ];
        if let Some(otp) = &credentials.otp_code {
            params.push(("otp_code", otp.as_str()));
        }

        info!(host = %server.host, user = %credentials.username, "login");
        let data: AuthLoginData = self
            .client
            .fetch_unauthenticated(server, AUTH_CGI, API_AUTH, "login", 3, &params)
            .await
            .map_err(Self::map_login_error)?;
        SessionId::new(data.sid)
    }

    async fn logout(&self) -> Result<(), DsError> {
        self.client
            .exec(AUTH_CGI, API_AUTH, "logout", 1, &[("session", SESSION_NAME)])
            .await
    }

    // --- Download tasks ---

    async fn list_tasks(&self) -> Result<Vec<DownloadTask>, DsError> {
        let data: TaskListData = self
            .client
            .fetch(
                TASK_CGI,
                API_TASK,
                "list",
                1,
                &[("additional", "detail,transfer")],
            )
            .await?;
        data.tasks.into_iter().map(DownloadTask::try_from).collect()
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<(), DsError> {
        request.validate()?;

        if let Some(file) = &request.file {
            let mut fields = Vec::new();
            if let Some(destination) = &request.destination {
                fields.push(("destination".to_string(), destination.clone()));
            }
            debug!(file = %file.name, "uploading torrent file");
            self.client
                .post_multipart::<serde_json::Value>(
                    TASK_CGI,
                    API_TASK,
                    "create",
                    1,
                    fields,
                    MultipartFile {
                        field_name: "file".to_string(),
                        file_name: file.name.clone(),
                        bytes: file.bytes.clone(),
                    },
                )
                .await?;
            return Ok(());
        }

        // validate() guarantees a URI when no file is present
        let uri = request.uri.as_deref().unwrap_or_default();
        let mut params = vec![("uri", uri)];
        if let Some(destination) = &request.destination {
            params.push(("destination", destination.as_str()));
        }
        self.client
            .exec(TASK_CGI, API_TASK, "create", 1, &params)
            .await
    }

    async fn pause_tasks(&self, ids: &[TaskId]) -> Result<(), DsError> {
        let joined = Self::join_ids(ids);
        self.client
            .exec(TASK_CGI, API_TASK, "pause", 1, &[("id", joined.as_str())])
            .await
    }

    async fn resume_tasks(&self, ids: &[TaskId]) -> Result<(), DsError> {
        let joined = Self::join_ids(ids);
        self.client
            .exec(TASK_CGI, API_TASK, "resume", 1, &[("id", joined.as_str())])
            .await
    }

    async fn delete_tasks(&self, ids: &[TaskId]) -> Result<(), DsError> {
        let joined = Self::join_ids(ids);
        self.client
            .exec(
                TASK_CGI,
                API_TASK,
                "delete",
                1,
                &[("id", joined.as_str()), ("force_complete", "false")],
            )
            .await
    }

    async fn edit_task_destination(
        &self,
        ids: &[TaskId],
        destination: &str,
    ) -> Result<(), DsError> {
        let joined = Self::join_ids(ids);
        self.client
            .exec(
                TASK_CGI,
                API_TASK,
                "edit",
                2,
                &[("id", joined.as_str()), ("destination", destination)],
            )
            .await
    }

    async fn statistics(&self) -> Result<Statistics, DsError> {
        let data: StatisticsData = self
            .client
            .fetch(STATISTIC_CGI, API_STATISTIC, "getinfo", 1, &[])
            .await?;
        Ok(data.into())
    }

    // --- RSS feeds ---

    async fn list_feeds(&self) -> Result<Vec<RssFeed>, DsError> {
        let data: RssSiteListData = self
            .client
            .fetch(RSS_SITE_CGI, API_RSS_SITE, "list", 1, &[])
            .await?;
        data.sites.into_iter().map(RssFeed::try_from).collect()
    }

    async fn list_feed_items(
        &self,
        feed: &FeedId,
        page: Pagination,
    ) -> Result<FeedItemPage, DsError> {
        let offset = page.offset.to_string();
        let limit = page.limit.to_string();
        let data: RssItemListData = self
            .client
            .fetch(
                RSS_FEED_CGI,
                API_RSS_FEED,
                "list",
                1,
                &[
                    ("id", feed.as_str()),
                    ("offset", offset.as_str()),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;
        Ok(FeedItemPage {
            items: data.items.into_iter().map(Into::into).collect(),
            total: data.total,
            offset: page.offset,
        })
    }

    async fn refresh_feed(&self, feed: &FeedId) -> Result<(), DsError> {
        self.client
            .exec(RSS_SITE_CGI, API_RSS_SITE, "refresh", 1, &[("id", feed.as_str())])
            .await
            .map_err(|err| match err {
                // Session and connectivity errors keep their semantics for
                // the retry/fallback machinery above
                e @ (DsError::Api { .. } | DsError::InvalidResponse) => {
                    debug!(feed = %feed, error = %e, "feed refresh failed");
                    DsError::FeedRefreshFailed(feed.clone())
                }
                other => other,
            })
    }

    // --- File Station ---

    async fn list_shares(&self) -> Result<Vec<SharedFolder>, DsError> {
        let data: ShareListData = self
            .client
            .fetch(ENTRY_CGI, API_FS_LIST, "list_share", 2, &[])
            .await?;
        Ok(data.shares.into_iter().map(Into::into).collect())
    }

    async fn list_folder(&self, path: &str) -> Result<Vec<FileSystemItem>, DsError> {
        let data: FileListData = self
            .client
            .fetch(
                ENTRY_CGI,
                API_FS_LIST,
                "list",
                2,
                &[("folder_path", path), ("additional", "size,time")],
            )
            .await
            .map_err(|e| Self::map_file_error(e, path))?;
        Ok(data.files.into_iter().map(Into::into).collect())
    }

    async fn create_folder(
        &self,
        parent: &str,
        name: &str,
    ) -> Result<FileSystemItem, DsError> {
        let data: CreateFolderData = self
            .client
            .fetch(
                ENTRY_CGI,
                API_FS_CREATE_FOLDER,
                "create",
                2,
                &[("folder_path", parent), ("name", name)],
            )
            .await
            .map_err(|e| Self::map_file_error(e, parent))?;
        data.folders
            .into_iter()
            .next()
            .map(Into::into)
            .ok_or(DsError::InvalidResponse)
    }
}
