//! Common test harness for bridge tests.
//!
//! Provides a mock backend and helpers to build its responses.

use serde_json::{Value, json};
use spicebridge::{Client, Tools};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API key every test client sends.
pub const API_KEY: &str = "test-key";

/// A mock backend plus tools wired to it.
pub struct TestBackend {
    pub server: MockServer,
    pub tools: Tools,
}

impl TestBackend {
    /// Starts a backend and a bridge client pointed at it.
    pub async fn start() -> Self {
        init_tracing();
        let server = MockServer::start().await;
        let client = Client::builder()
            .endpoint(server.uri())
            .api_key(API_KEY)
            .build()
            .expect("client should build against the mock server");
        Self {
            server,
            tools: Tools::new(client),
        }
    }

    /// Answers every POST to `route` with a JSON document.
    pub async fn json(&self, route: &str, body: Value) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answers POSTs to `route` with newline-delimited JSON.
    ///
    /// With a `cursor`, only requests carrying that cursor match; those
    /// mocks take priority over the cursor-less first page.
    pub async fn stream(&self, route: &str, cursor: Option<&str>, lines: &[Value]) {
        let body: String = lines.iter().map(|line| format!("{}\n", line)).collect();
        let template = ResponseTemplate::new(200)
            .insert_header("content-type", "application/x-ndjson")
            .set_body_string(body);

        let mock = Mock::given(method("POST")).and(path(route));
        let mock = match cursor {
            Some(token) => mock
                .and(body_partial_json(json!({"optionalCursor": {"token": token}})))
                .respond_with(template)
                .with_priority(1),
            None => mock.respond_with(template),
        };
        mock.mount(&self.server).await;
    }

    /// Answers POSTs to `route` with an error status.
    pub async fn fail(&self, route: &str, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies the backend received on `route`, in arrival order.
    pub async fn bodies(&self, route: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == route)
            .map(|request| serde_json::from_slice(&request.body).expect("request body is JSON"))
            .collect()
    }

    /// Number of requests the backend received, on any route.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

/// A `{"result": relationship}` stream line.
pub fn relationship_line(text: &str, cursor: Option<&str>) -> Value {
    let rel: spicebridge::Relationship = text.parse().expect("valid relationship notation");
    let mut result = json!({ "relationship": rel });
    if let Some(token) = cursor {
        result["afterResultCursor"] = json!({ "token": token });
    }
    json!({ "result": result })
}

/// A `{"result": resource}` stream line.
pub fn resource_line(id: &str, cursor: Option<&str>) -> Value {
    let mut result = json!({
        "resourceObjectId": id,
        "permissionship": "LOOKUP_PERMISSIONSHIP_HAS_PERMISSION"
    });
    if let Some(token) = cursor {
        result["afterResultCursor"] = json!({ "token": token });
    }
    json!({ "result": result })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
