//! Use cases (interactors) for the Download Station client
//!
//! Thin coordinators over the repository ports. Each public operation
//! validates its input, then delegates to exactly one repository method;
//! business rules live in the domain and all I/O behind the ports.
//!
//! ## Use Cases
//!
//! - [`AuthUseCase`] - login, logout, session validation
//! - [`TaskUseCase`] - download task listing, creation, and control
//! - [`FeedUseCase`] - RSS feed listing, item pages, server-side refresh
//! - [`FileStationUseCase`] - shared folder browsing and folder creation

pub mod auth;
pub mod feeds;
pub mod filestation;
pub mod tasks;

pub use auth::AuthUseCase;
pub use feeds::FeedUseCase;
pub use filestation::FileStationUseCase;
pub use tasks::TaskUseCase;
