//! Connectivity monitor port
//!
//! Tracks whether the configured server is reachable. Repositories consult
//! it before attempting network calls so an offline client fails fast to
//! cache instead of waiting out a full request timeout.

use std::time::Duration;

/// Port trait for server reachability tracking
#[async_trait::async_trait]
pub trait IConnectivityMonitor: Send + Sync {
    /// Whether the server is currently believed reachable
    async fn is_connected(&self) -> bool;

    /// Polls reachability (at roughly 500ms intervals) until the server
    /// becomes reachable or the timeout elapses. Returns the final state.
    async fn wait_for_connection(&self, timeout: Duration) -> bool;
}
