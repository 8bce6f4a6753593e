//! dstation-api - NAS REST API gateway
//!
//! Async client for the Download Station family of NAS web APIs:
//! - session-based login with optional OTP
//! - `{data, success, error}` envelope decoding with exact error-code mapping
//! - form-encoded and multipart requests (torrent upload)
//! - keyring-backed session persistence and a reachability probe
//!
//! ## Modules
//!
//! - [`transport`] - raw HTTP layer with classified failures
//! - [`form`] - idempotent form encoding for query and body parameters
//! - [`client`] - envelope-aware API client bound to one server + session
//! - [`dto`] - wire types and their domain mapping
//! - [`gateway`] - `IStationGateway` implementation over the client
//! - [`session_store`] - `ISessionStore` backed by the OS keyring
//! - [`connectivity`] - `IConnectivityMonitor` backed by a lightweight probe

pub mod client;
pub mod connectivity;
pub mod dto;
pub mod form;
pub mod gateway;
pub mod session_store;
pub mod transport;

pub use client::DsApiClient;
pub use connectivity::ProbeConnectivityMonitor;
pub use gateway::StationGateway;
pub use session_store::KeyringSessionStore;
pub use transport::{ReqwestTransport, Transport, TransportError};
