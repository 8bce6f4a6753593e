//! Session store port
//!
//! Durable owner of the one server's session and credential pair across
//! process restarts. Implementations must use the most restrictive secure
//! store available (OS keyring); credentials never land alongside ordinary
//! app data. Single-tenant: fixed logical keys, one server.

use crate::domain::{Credentials, DsError, Session};

/// Port trait for the secure session/credential store
///
/// Methods are synchronous: keyring access is a fast local IPC call, and the
/// trait is invoked from async repository code without suspension.
pub trait ISessionStore: Send + Sync {
    /// Persists the session record, overwriting any previous one
    fn save_session(&self, session: &Session) -> Result<(), DsError>;

    /// Loads the stored session, if any
    fn load_session(&self) -> Result<Option<Session>, DsError>;

    /// Persists the credential pair for automatic re-login. One-time codes
    /// are single-use and must never be stored.
    fn save_credentials(&self, credentials: &Credentials) -> Result<(), DsError>;

    /// Loads the stored credentials, if any
    fn load_credentials(&self) -> Result<Option<Credentials>, DsError>;

    /// Removes session and credentials. Must succeed (Ok) when nothing is
    /// stored.
    fn clear(&self) -> Result<(), DsError>;
}
