//! Transport layer for backend communication.
//!
//! This module provides the underlying transport implementations:
//!
//! - REST transport (via reqwest) - talks to the backend's JSON gateway
//! - Mock transport - scripted answers for testing without network
//!
//! Both normalize answers into [`ApiResponse`]. Users normally interact with
//! the higher-level [`Client`](crate::Client), which owns one transport
//! behind an `Arc<dyn Transport>`.

mod mock;
mod rest;
mod traits;

pub use mock::{MockTransport, RecordedRequest};
pub use rest::{RestTransport, RestTransportBuilder};
pub use traits::{ApiResponse, Transport, TransportStats};
