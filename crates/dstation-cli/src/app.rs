//! Dependency wiring
//!
//! Builds the adapter stack (transport, gateway, keyring store, probe
//! monitor) and injects it into the repositories and use cases. Every
//! command goes through one [`App`] instance.

use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;

use dstation_api::transport::ReqwestTransport;
use dstation_api::{KeyringSessionStore, ProbeConnectivityMonitor, StationGateway};
use dstation_cache::retry::SessionRefresher;
use dstation_cache::{
    AuthRepository, FeedRepository, FileStationRepository, MemoryCache, TaskRepository,
};
use dstation_core::config::Config;
use dstation_core::domain::{DsError, Session};
use dstation_core::ports::IConnectivityMonitor;
use dstation_core::usecases::{AuthUseCase, FeedUseCase, FileStationUseCase, TaskUseCase};

/// Fully wired application
pub struct App {
    pub auth: AuthUseCase,
    pub tasks: TaskUseCase,
    pub feeds: FeedUseCase,
    pub files: FileStationUseCase,
    connectivity: Arc<ProbeConnectivityMonitor>,
}

impl App {
    /// Wires the full stack from the loaded configuration
    pub fn build(config: &Config) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(
            config.timeouts.request(),
            config.timeouts.download(),
        )?);
        let gateway = Arc::new(StationGateway::new(transport));
        let store = Arc::new(KeyringSessionStore::new());
        let cache = Arc::new(MemoryCache::new());
        let connectivity = Arc::new(ProbeConnectivityMonitor::new()?);

        let auth_repository = Arc::new(AuthRepository::new(
            gateway.clone(),
            store,
            cache.clone(),
            Duration::hours(config.session.max_age_hours),
        ));
        let refresher: Arc<dyn SessionRefresher> = auth_repository.clone();

        let task_repository = Arc::new(TaskRepository::new(
            gateway.clone(),
            cache.clone(),
            connectivity.clone(),
            refresher.clone(),
        ));
        let feed_repository = Arc::new(FeedRepository::new(
            gateway.clone(),
            cache,
            connectivity.clone(),
            refresher.clone(),
        ));
        let file_repository = Arc::new(FileStationRepository::new(gateway, refresher));

        Ok(Self {
            auth: AuthUseCase::new(auth_repository),
            tasks: TaskUseCase::new(task_repository),
            feeds: FeedUseCase::new(feed_repository),
            files: FileStationUseCase::new(file_repository),
            connectivity,
        })
    }

    /// Loads the config from its default path and wires the stack
    pub fn from_default_config() -> Result<Self> {
        let config = Config::load_or_default(&Config::default_path());
        Self::build(&config)
    }

    /// Restores the stored session, binds the gateway, and points the
    /// reachability probe at the session's server. Every authenticated
    /// command starts here.
    pub async fn ensure_session(&self) -> Result<Session, DsError> {
        let session = self.auth.validate_session().await?;
        self.connectivity.set_server(session.server.clone()).await;
        Ok(session)
    }

    /// Probes whether the configured server answers right now
    pub async fn is_online(&self) -> bool {
        self.connectivity.is_connected().await
    }
}
