//! CLI command implementations

pub mod auth;
pub mod feeds;
pub mod fs;
pub mod status;
pub mod tasks;
