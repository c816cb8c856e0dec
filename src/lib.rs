//! # spicebridge
//!
//! Exposes a SpiceDB-style permissions backend's HTTP API as tools and
//! resources an agent can call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spicebridge::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), spicebridge::Error> {
//!     // One client per process, configured from the environment
//!     let client = Client::from_config(&Config::from_env())?;
//!     let tools = Tools::new(client);
//!
//!     let output = tools
//!         .call(
//!             "read-relationships",
//!             json!({"resourceType": "document", "resourceId": "readme"}),
//!         )
//!         .await;
//!     println!("{}", output.text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Relationship notation**: `resourceType:resourceId#relation@subjectType:subjectId[#subjectRelation]`
//! - **Responses**: the backend answers with one JSON document or with
//!   newline-delimited JSON; both become an [`ApiResponse`]
//! - **Pagination**: list endpoints are drained to completion internally,
//!   the caller never sees a cursor
//! - **Denial ≠ Error**: a check answering `NO_PERMISSION` is a successful call
//!
//! ## Features
//!
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Transport layer
pub mod transport;

// Response handling
pub mod explain;
pub mod pagination;
pub mod schema;

// Tool dispatch
pub mod tools;

// Prelude for convenient imports
pub mod prelude;

mod user_agent;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, Result};
pub use types::{
    CheckRequest, CheckResult, Consistency, DecisionTrace, LookupPermissionship,
    LookupResourceResult, LookupResourcesRequest, LookupSubjectResult, LookupSubjectsRequest,
    ObjectRef, Operation, PermissionTree, PermissionType, Permissionship, RelationFilter,
    Relationship, RelationshipFilter, RelationshipUpdate, SetOperation, SubProblems,
    SubjectFilter, SubjectRef, TreeNode, ZedToken,
};

// Re-export config types
pub use config::Config;

// Re-export transport types
pub use transport::{ApiResponse, MockTransport, RestTransport, Transport};

// Re-export tool dispatch
pub use tools::{ResourceContent, ResourceInfo, ToolOutput, Tools};
