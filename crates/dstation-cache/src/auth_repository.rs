//! Auth repository
//!
//! Owns the session lifecycle: login persists session and credentials and
//! binds the gateway; validate restores a stored session, refreshing it
//! proactively when the age heuristic flags it; logout is best-effort on
//! the wire and unconditional locally.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tracing::{debug, info, warn};

use dstation_core::domain::{Credentials, DsError, ServerConfiguration, Session};
use dstation_core::ports::{IAuthRepository, ISessionStore, IStationGateway};

use crate::memory::MemoryCache;
use crate::retry::SessionRefresher;

/// [`IAuthRepository`] over the gateway, the secure store, and the cache
pub struct AuthRepository {
    gateway: Arc<dyn IStationGateway>,
    store: Arc<dyn ISessionStore>,
    cache: Arc<MemoryCache>,
    /// Sessions older than this are refreshed before use
    max_session_age: Duration,
}

impl AuthRepository {
    /// Creates the repository with the given session age heuristic
    pub fn new(
        gateway: Arc<dyn IStationGateway>,
        store: Arc<dyn ISessionStore>,
        cache: Arc<MemoryCache>,
        max_session_age: Duration,
    ) -> Self {
        Self {
            gateway,
            store,
            cache,
            max_session_age,
        }
    }

    /// Logs in against `server`, persists the result, binds the gateway
    async fn login_and_persist(
        &self,
        server: ServerConfiguration,
        credentials: &Credentials,
    ) -> Result<Session, DsError> {
        let session_id = self.gateway.login(&server, credentials).await?;
        let session = Session::new(session_id.clone(), server.clone());

        self.store.save_session(&session)?;
        // The store strips any OTP code; it is single-use by contract
        self.store.save_credentials(credentials)?;

        self.gateway.configure(&server, Some(session_id)).await?;
        Ok(session)
    }
}

#[async_trait]
impl IAuthRepository for AuthRepository {
    async fn login(
        &self,
        server: ServerConfiguration,
        credentials: Credentials,
    ) -> Result<Session, DsError> {
        let session = self.login_and_persist(server, &credentials).await?;
        info!(host = %session.server.host, "logged in");
        Ok(session)
    }

    async fn logout(&self) -> Result<(), DsError> {
        // Best effort on the wire; local erasure happens regardless
        if let Err(err) = self.gateway.logout().await {
            warn!(error = %err, "remote logout failed, clearing local state anyway");
        }
        self.store.clear()?;
        self.cache.clear_all().await;
        self.gateway.clear_configuration().await;
        info!("logged out");
        Ok(())
    }

    async fn validate_session(&self) -> Result<Session, DsError> {
        let Some(session) = self.store.load_session()? else {
            return Err(DsError::NotAuthenticated);
        };
        if !session.is_valid() {
            return Err(DsError::NotAuthenticated);
        }

        if session.might_be_expired(self.max_session_age) {
            debug!(age_hours = session.age().num_hours(), "session is stale, refreshing");
            return self.refresh_session().await;
        }

        // A stored record can carry a server that no longer validates
        // (hand-edited or corrupted keyring entry); surface that instead
        // of leaving the gateway unbound
        self.gateway
            .configure(&session.server, Some(session.session_id.clone()))
            .await?;
        Ok(session)
    }

    async fn refresh_session(&self) -> Result<Session, DsError> {
        let Some(session) = self.store.load_session()? else {
            return Err(DsError::NotAuthenticated);
        };
        let Some(credentials) = self.store.load_credentials()? else {
            return Err(DsError::ServerCredentialsNotFound(
                session.server.host.clone(),
            ));
        };

        self.login_and_persist(session.server.clone(), &credentials)
            .await
            .map_err(|err| match err {
                // OTP and connectivity errors keep their own semantics so
                // callers can prompt or fall back to cache
                e @ (DsError::OtpRequired | DsError::OtpInvalid) => e,
                e if e.is_connectivity_error() => e,
                other => DsError::ReloginFailed(other.to_string()),
            })
    }
}

#[async_trait]
impl SessionRefresher for AuthRepository {
    async fn refresh(&self) -> Result<(), DsError> {
        self.refresh_session().await.map(|_| ())
    }
}
