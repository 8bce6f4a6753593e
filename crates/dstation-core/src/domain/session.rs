//! Session and credential types
//!
//! A [`Session`] records the opaque token the server issued at login together
//! with the server it belongs to. Sessions have no hard client-side expiry:
//! [`Session::might_be_expired`] is a heuristic that makes an old session
//! eligible for a proactive refresh, while the server (via API code 105)
//! remains the authority on actual expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DsError;
use super::newtypes::SessionId;
use super::server::ServerConfiguration;

/// Default age after which a session is treated as possibly expired (hours)
pub const DEFAULT_SESSION_MAX_AGE_HOURS: i64 = 24;

/// An authenticated session against one server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session token issued by the server
    pub session_id: SessionId,
    /// The server this session was established against
    pub server: ServerConfiguration,
    /// When the session was established
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session established now
    pub fn new(session_id: SessionId, server: ServerConfiguration) -> Self {
        Self {
            session_id,
            server,
            created_at: Utc::now(),
        }
    }

    /// A session is valid iff its token is non-empty.
    ///
    /// `SessionId` construction already rejects empty tokens, so this only
    /// guards records deserialized from older store formats.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.session_id.as_str().is_empty()
    }

    /// Age of the session relative to now
    #[must_use]
    pub fn age(&self) -> Duration {
        Utc::now() - self.created_at
    }

    /// Heuristic expiry check: age beyond `max_age` makes the session
    /// eligible for a proactive refresh. NOT a hard expiry signal.
    #[must_use]
    pub fn might_be_expired(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }

    /// [`Self::might_be_expired`] with the default 24-hour threshold
    #[must_use]
    pub fn might_be_expired_default(&self) -> bool {
        self.might_be_expired(Duration::hours(DEFAULT_SESSION_MAX_AGE_HOURS))
    }
}

/// Login credentials for one server account
///
/// The OTP code is single-use per login attempt and is never persisted:
/// [`Credentials::without_otp`] strips it before the pair reaches any store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
    /// One-time password for accounts with 2-factor auth enabled
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub otp_code: Option<String>,
}

impl Credentials {
    /// Creates validated credentials.
    ///
    /// # Errors
    /// Returns `DsError::InvalidInput` if username or password is empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        otp_code: Option<String>,
    ) -> Result<Self, DsError> {
        let credentials = Self {
            username: username.into(),
            password: password.into(),
            otp_code,
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Validates that username and password are non-empty
    pub fn validate(&self) -> Result<(), DsError> {
        if self.username.is_empty() {
            return Err(DsError::InvalidInput(
                "Username must not be empty".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(DsError::InvalidInput(
                "Password must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy of the credentials with the single-use OTP code discarded
    #[must_use]
    pub fn without_otp(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: self.password.clone(),
            otp_code: None,
        }
    }
}
