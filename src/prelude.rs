//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy importing:
//!
//! ```rust
//! use spicebridge::prelude::*;
//! ```
//!
//! This provides access to:
//! - Client and tool dispatch types
//! - Error types
//! - Common data types

pub use crate::{
    client::{Client, ClientBuilder},
    config::Config,
    error::{Error, ErrorKind},
    tools::{ToolOutput, Tools},
    transport::{ApiResponse, MockTransport, Transport},
    types::{
        CheckRequest, CheckResult, Consistency, DecisionTrace, ObjectRef, Permissionship,
        Relationship, RelationshipFilter, RelationshipUpdate, SubjectRef, ZedToken,
    },
};
