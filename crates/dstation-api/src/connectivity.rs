//! Connectivity monitor adapter
//!
//! Probes the configured server with a cheap HTTP request to decide whether
//! network calls are worth attempting. Repositories consult this before a
//! forced refresh so an offline client falls back to cache immediately
//! instead of waiting out the full request timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::trace;

use dstation_core::domain::ServerConfiguration;
use dstation_core::ports::IConnectivityMonitor;

/// Timeout for one reachability probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Interval between probes in `wait_for_connection`
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// [`IConnectivityMonitor`] that probes the server's base URL
pub struct ProbeConnectivityMonitor {
    client: Client,
    server: RwLock<Option<ServerConfiguration>>,
}

impl ProbeConnectivityMonitor {
    /// Creates a monitor with no server bound yet
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            // Reachability is about the TCP/TLS path, not certificate trust
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            client,
            server: RwLock::new(None),
        })
    }

    /// Binds the monitor to the server to probe
    pub async fn set_server(&self, server: ServerConfiguration) {
        *self.server.write().await = Some(server);
    }
}

#[async_trait]
impl IConnectivityMonitor for ProbeConnectivityMonitor {
    async fn is_connected(&self) -> bool {
        let Some(server) = self.server.read().await.clone() else {
            // Nothing configured yet: let the real request classify failure
            return true;
        };
        let reachable = self
            .client
            .head(server.base_url())
            .send()
            .await
            .is_ok();
        trace!(host = %server.host, reachable, "connectivity probe");
        reachable
    }

    async fn wait_for_connection(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.is_connected().await {
                return true;
            }
            if tokio::time::Instant::now() + POLL_INTERVAL > deadline {
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
