//! Authentication use case
//!
//! Orchestrates login, logout, and session validation against the auth
//! repository. Credential and server validation happens here, before any
//! network traffic; session persistence and gateway configuration are the
//! repository's concern.

use std::sync::Arc;

use tracing::info;

use crate::{
    domain::{Credentials, DsError, ServerConfiguration, Session},
    ports::IAuthRepository,
};

/// Use case for authentication operations
pub struct AuthUseCase {
    auth_repository: Arc<dyn IAuthRepository>,
}

impl AuthUseCase {
    /// Creates a new AuthUseCase with the required dependencies
    pub fn new(auth_repository: Arc<dyn IAuthRepository>) -> Self {
        Self { auth_repository }
    }

    /// Authenticates against the server and returns the established session
    ///
    /// Validates the server configuration and credentials locally first,
    /// so malformed input never reaches the network.
    ///
    /// # Errors
    ///
    /// Returns [`DsError::InvalidServerConfiguration`] or
    /// [`DsError::InvalidInput`] for local validation failures, otherwise
    /// whatever the login itself produced (`InvalidCredentials`,
    /// `OtpRequired`, connectivity errors, ...).
    pub async fn login(
        &self,
        server: ServerConfiguration,
        credentials: Credentials,
    ) -> Result<Session, DsError> {
        server.validate()?;
        credentials.validate()?;

        info!(host = %server.host, "logging in");
        self.auth_repository.login(server, credentials).await
    }

    /// Ends the session remotely (best effort) and erases local state
    pub async fn logout(&self) -> Result<(), DsError> {
        info!("logging out");
        self.auth_repository.logout().await
    }

    /// Restores the persisted session, refreshing it if it looks stale
    ///
    /// # Errors
    ///
    /// Returns [`DsError::NotAuthenticated`] when no session is stored.
    pub async fn validate_session(&self) -> Result<Session, DsError> {
        self.auth_repository.validate_session().await
    }
}

// ============================================================================
// Tests
// ============================================================================
