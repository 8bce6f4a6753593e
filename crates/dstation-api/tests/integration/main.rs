//! Integration tests for dstation-api
//!
//! Uses wiremock to simulate the NAS web API and verifies end-to-end
//! behavior of the gateway: envelope decoding, error-code mapping,
//! session token attachment, and multipart upload.

mod common;

mod test_auth;
mod test_client;
mod test_connectivity;
mod test_feeds;
mod test_tasks;
mod test_transport;
