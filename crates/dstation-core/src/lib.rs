//! dstation Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `ServerConfiguration`, `Session`, `Credentials`,
//!   `DownloadTask`, `RssFeed`, `FileSystemItem`
//! - **Error taxonomy** - the closed [`DsError`](domain::DsError) union every
//!   layer above the transport speaks
//! - **Port definitions** - Traits for adapters: `IStationGateway`,
//!   `ISessionStore`, `IConnectivityMonitor`, plus the repository ports
//! - **Use cases** - One-operation façades enforcing input validation
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no network dependencies.
//! Ports define trait interfaces that adapter crates implement. Use cases
//! validate input and call exactly one repository method.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
