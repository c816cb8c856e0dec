//! Configuration types for the bridge.
//!
//! This module provides [`Config`]: the backend endpoint, API key and TLS
//! flag, loaded once from the environment or built explicitly.

mod backend;

pub use backend::{API_KEY_VAR, Config, DEFAULT_ENDPOINT, ENDPOINT_VAR, TLS_VAR};
