//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the trait boundaries the domain core depends on; their
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IStationGateway`] - Remote API operations (auth, tasks, feeds, files)
//! - [`ISessionStore`] - Secure persistence for session and credentials
//! - [`IConnectivityMonitor`] - Server reachability tracking
//! - Repository ports - Cache-aware entity access consumed by the use cases

pub mod connectivity;
pub mod gateway;
pub mod repository;
pub mod session_store;

pub use connectivity::IConnectivityMonitor;
pub use gateway::IStationGateway;
pub use repository::{
    Cached, IAuthRepository, IFeedRepository, IFileStationRepository, ITaskRepository,
};
pub use session_store::ISessionStore;
