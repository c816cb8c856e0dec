//! Transport trait definitions and common types.
//!
//! This module defines the transport abstraction the [`Client`](crate::Client)
//! talks through, and the [`ApiResponse`] shape every transport normalizes
//! backend answers into.

use reqwest::Method;
use serde_json::Value;

use crate::Error;

// ============================================================================
// Normalized Response
// ============================================================================

/// A backend answer, normalized across its two body formats.
///
/// The backend answers either with one JSON document or with
/// newline-delimited JSON (one document per line). Both go through the same
/// line-splitting path in [`ApiResponse::from_body`], so a single-line body
/// becomes [`Single`](ApiResponse::Single) and a multi-line one becomes
/// [`Many`](ApiResponse::Many).
///
/// ```rust
/// use spicebridge::ApiResponse;
///
/// let many = ApiResponse::from_body("{\"a\":1}\n\n{\"a\":2}\n{\"a\":3}\n").unwrap();
/// assert_eq!(many.len(), 3);
///
/// let single = ApiResponse::from_body("{\"schemaText\":\"definition user {}\"}").unwrap();
/// assert!(matches!(single, ApiResponse::Single(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// No content (204, or a success with an empty body).
    Empty,
    /// Exactly one JSON document.
    Single(Value),
    /// Several documents, in body order.
    Many(Vec<Value>),
}

impl ApiResponse {
    /// Parses a response body, one JSON document per non-blank line.
    ///
    /// Fails with [`ErrorKind::Parse`](crate::ErrorKind::Parse), carrying the
    /// offending line, if any line is not valid JSON. There is no partial
    /// success within one body.
    pub fn from_body(body: &str) -> Result<Self, Error> {
        let mut values = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str::<Value>(line).map_err(|e| Error::parse(line, e)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match values.len() {
            0 => ApiResponse::Empty,
            1 => ApiResponse::Single(values.remove(0)),
            _ => ApiResponse::Many(values),
        })
    }

    /// Returns the number of parsed documents.
    pub fn len(&self) -> usize {
        match self {
            ApiResponse::Empty => 0,
            ApiResponse::Single(_) => 1,
            ApiResponse::Many(values) => values.len(),
        }
    }

    /// Returns `true` for [`ApiResponse::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, ApiResponse::Empty)
    }

    /// Returns the document of a single-document response.
    ///
    /// Unary endpoints answer with exactly one document; anything else
    /// yields `None`.
    pub fn into_single(self) -> Option<Value> {
        match self {
            ApiResponse::Single(value) => Some(value),
            ApiResponse::Empty | ApiResponse::Many(_) => None,
        }
    }
}

// ============================================================================
// Transport Statistics
// ============================================================================

/// Counters kept by a transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Requests sent.
    pub requests: u64,
    /// Requests that ended in an error of any kind.
    pub failures: u64,
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Issues one backend call and normalizes its answer.
///
/// Implementations never retry and add no timeout of their own.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends `body` (if any) as JSON to `path` and parses the answer.
    ///
    /// A non-success status fails with [`ErrorKind::Api`](crate::ErrorKind::Api)
    /// carrying the status and the full response body.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, Error>;

    /// Returns transport statistics.
    fn stats(&self) -> TransportStats;
}
