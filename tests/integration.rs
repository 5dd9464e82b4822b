//! Integration test suite against a mock Authware API.
//!
//! Run with:
//!   RUST_LOG=authware_client=debug cargo test --test integration -- --nocapture

#[path = "integration/common.rs"]
mod common;
#[path = "integration/scenarios.rs"]
mod scenarios;
