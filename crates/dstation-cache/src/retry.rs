//! Bounded session-expiry retry
//!
//! A call that comes back with `SessionExpired` gets exactly one re-login
//! followed by one retry of the original operation. A failed re-login
//! propagates the re-login's own error; a second `SessionExpired` from the
//! retry propagates as-is. No other error is ever retried.

use std::future::Future;

use async_trait::async_trait;
use tracing::{debug, warn};

use dstation_core::domain::DsError;

/// Performs the one re-login when a call reports session expiry
#[async_trait]
pub trait SessionRefresher: Send + Sync {
    /// Re-login with stored credentials and rebind the gateway
    async fn refresh(&self) -> Result<(), DsError>;
}

/// Runs `operation`, retrying once after a successful session refresh
pub async fn with_session_retry<T, F, Fut>(
    refresher: &dyn SessionRefresher,
    operation: F,
) -> Result<T, DsError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, DsError>>,
{
    match operation().await {
        Err(DsError::SessionExpired) => {
            debug!("session expired, attempting re-login");
            if let Err(refresh_err) = refresher.refresh().await {
                warn!(error = %refresh_err, "re-login failed");
                return Err(refresh_err);
            }
            operation().await
        }
        other => other,
    }
}

// ============================================================================
// Tests
// ============================================================================
