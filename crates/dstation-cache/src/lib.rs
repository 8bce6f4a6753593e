//! dstation Cache - Cache-first repositories
//!
//! In-memory cache plus the repository implementations that orchestrate it
//! with the station gateway and the connectivity monitor. This crate is the
//! driven side of the ports in `dstation-core`: use cases talk to the
//! repository traits, which decide between cache, network, and offline
//! fallback.
//!
//! ## Key Components
//!
//! - [`MemoryCache`] - per-collection in-memory cache slots
//! - [`AuthRepository`] - session lifecycle over gateway + secure store
//! - [`TaskRepository`] / [`FeedRepository`] - cache-first reads,
//!   invalidate-on-mutation writes, bounded re-login retry
//! - [`FileStationRepository`] - uncached remote filesystem browsing
//!
//! ## Cache-first algorithm
//!
//! For `get(force_refresh = false)`: serve the cache when populated.
//! Otherwise (or when forced) consult connectivity; offline returns the
//! cache when possible or `NoConnection`. Online fetches, overwrites the
//! cache whole, and returns fresh. Mutations never touch the cache except
//! to invalidate the affected collection on success.

pub mod auth_repository;
pub mod feed_repository;
pub mod file_repository;
pub mod memory;
pub mod retry;
pub mod task_repository;

pub use auth_repository::AuthRepository;
pub use feed_repository::FeedRepository;
pub use file_repository::FileStationRepository;
pub use memory::{CacheKey, MemoryCache};
pub use task_repository::TaskRepository;
