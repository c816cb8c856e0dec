//! Error types for the bridge.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`]:
//!
//! - `Format`: malformed relationship notation
//! - `Api`: the backend answered with a non-success status (status + raw body attached)
//! - `Parse`: a response line was not valid JSON (offending line attached)
//! - `Validation`: a tool invocation omitted a required field
//!
//! ## Key Invariant
//!
//! No error is retried at this layer. The tool dispatch boundary converts
//! every error into a structured failure response; nothing here panics.
//!
//! ```rust
//! use spicebridge::{Error, ErrorKind};
//!
//! let err = Error::api(404, "{\"message\":\"not found\"}");
//! assert_eq!(err.kind(), ErrorKind::Api);
//! assert_eq!(err.status(), Some(404));
//! ```

mod core;
mod kind;

pub use core::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;
