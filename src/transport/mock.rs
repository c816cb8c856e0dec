//! Mock transport implementation for testing.
//!
//! This module provides a scripted transport that answers from an in-memory
//! queue, allowing the client, the aggregator and the tool layer to be
//! tested without network dependencies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use reqwest::Method;
use serde_json::Value;

use super::traits::{ApiResponse, Transport, TransportStats};
use crate::Error;

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
}

/// Mock transport for testing.
///
/// Answers each request with the next scripted response. Once the script
/// runs out, the fallback response (if set) is repeated forever, otherwise
/// requests fail with a transport error.
///
/// ```rust
/// use spicebridge::{ApiResponse, MockTransport};
/// use serde_json::json;
///
/// let mock = MockTransport::new();
/// mock.push_response(ApiResponse::Single(json!({"schemaText": "definition user {}"})));
/// assert_eq!(mock.pending(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<ApiResponse, Error>>>,
    fallback: RwLock<Option<ApiResponse>>,
    requests: RwLock<Vec<RecordedRequest>>,
    request_count: AtomicU64,
    failure_count: AtomicU64,
}

impl MockTransport {
    /// Creates a mock transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn push_response(&self, response: ApiResponse) {
        self.script.lock().push_back(Ok(response));
    }

    /// Queues a raw body, parsed the same way a real response body is.
    pub fn push_body(&self, body: &str) {
        self.script.lock().push_back(ApiResponse::from_body(body));
    }

    /// Queues a single JSON document.
    pub fn push_json(&self, value: Value) {
        self.push_response(ApiResponse::Single(value));
    }

    /// Queues a failure.
    pub fn push_error(&self, error: Error) {
        self.script.lock().push_back(Err(error));
    }

    /// Sets the response repeated once the script is exhausted.
    pub fn set_fallback(&self, response: ApiResponse) {
        *self.fallback.write() = Some(response);
    }

    /// Returns the number of scripted responses not yet consumed.
    pub fn pending(&self) -> usize {
        self.script.lock().len()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.read().last().cloned()
    }

    fn next_response(&self) -> Result<ApiResponse, Error> {
        if let Some(next) = self.script.lock().pop_front() {
            return next;
        }
        match *self.fallback.read() {
            Some(ref fallback) => Ok(fallback.clone()),
            None => Err(Error::transport("mock transport script exhausted")),
        }
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, Error> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.requests.write().push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        let response = self.next_response();
        if response.is_err() {
            self.failure_count.fetch_add(1, Ordering::Relaxed);
        }
        response
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            requests: self.request_count(),
            failures: self.failure_count.load(Ordering::Relaxed),
        }
    }
}
