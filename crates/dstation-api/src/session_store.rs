//! Keyring-backed session store
//!
//! Persists the session record and credential pair in the OS credential
//! store (GNOME Keyring, KDE Wallet, macOS Keychain) under fixed logical
//! keys. Session and credentials live in separate entries so clearing one
//! can never leak the other.

use keyring::Entry;
use tracing::debug;

use dstation_core::domain::{Credentials, DsError, Session};
use dstation_core::ports::ISessionStore;

/// Keyring service name
const KEYRING_SERVICE: &str = "dstation";

/// Fixed entry name for the session record
const SESSION_ENTRY: &str = "session";

/// Fixed entry name for the credential pair
const CREDENTIALS_ENTRY: &str = "credentials";

/// [`ISessionStore`] implementation over the system keyring
///
/// Values are serialized as JSON. The store is single-tenant: one session,
/// one credential pair, fixed entry names.
pub struct KeyringSessionStore {
    service: String,
}

impl KeyringSessionStore {
    /// Store under the stock service name
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
        }
    }

    /// Store under a custom service name (used by tests to avoid touching
    /// the real entries)
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, name: &str) -> Result<Entry, DsError> {
        Entry::new(&self.service, name).map_err(|e| DsError::Storage(e.to_string()))
    }

    fn write(&self, name: &str, json: &str) -> Result<(), DsError> {
        self.entry(name)?
            .set_password(json)
            .map_err(|e| DsError::Storage(e.to_string()))
    }

    fn read(&self, name: &str) -> Result<Option<String>, DsError> {
        match self.entry(name)?.get_password() {
            Ok(json) => Ok(Some(json)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(DsError::Storage(e.to_string())),
        }
    }

    fn delete(&self, name: &str) -> Result<(), DsError> {
        match self.entry(name)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(DsError::Storage(e.to_string())),
        }
    }
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ISessionStore for KeyringSessionStore {
    fn save_session(&self, session: &Session) -> Result<(), DsError> {
        let json =
            serde_json::to_string(session).map_err(|e| DsError::Storage(e.to_string()))?;
        self.write(SESSION_ENTRY, &json)?;
        debug!(host = %session.server.host, "session stored in keyring");
        Ok(())
    }

    fn load_session(&self) -> Result<Option<Session>, DsError> {
        match self.read(SESSION_ENTRY)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| DsError::Storage(e.to_string())),
            None => Ok(None),
        }
    }

    fn save_credentials(&self, credentials: &Credentials) -> Result<(), DsError> {
        // OTP codes are single-use and never persisted
        let stripped = credentials.without_otp();
        let json =
            serde_json::to_string(&stripped).map_err(|e| DsError::Storage(e.to_string()))?;
        self.write(CREDENTIALS_ENTRY, &json)
    }

    fn load_credentials(&self) -> Result<Option<Credentials>, DsError> {
        match self.read(CREDENTIALS_ENTRY)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| DsError::Storage(e.to_string())),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), DsError> {
        self.delete(SESSION_ENTRY)?;
        self.delete(CREDENTIALS_ENTRY)?;
        debug!("session and credentials cleared from keyring");
        Ok(())
    }
}
