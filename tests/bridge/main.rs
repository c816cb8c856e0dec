//! End-to-end tests for the bridge.
//!
//! Every test starts a local `wiremock` server standing in for the
//! permissions backend, points a real REST-backed client at it, and drives
//! the bridge through [`spicebridge::Tools`].
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test bridge
//!
//! # With the bridge's own logs
//! RUST_LOG=spicebridge=debug cargo test --test bridge -- --nocapture
//! ```

mod common;
mod resources_tests;
mod tools_tests;
