//! Navigable resources against a mock backend.

use serde_json::json;
use spicebridge::ErrorKind;
use spicebridge::client::paths;

use crate::common::{TestBackend, relationship_line};

const SCHEMA: &str = "\
definition user {}

definition group {
    relation member: user | group#member
}

definition document {
    relation owner: user
    relation viewer: user | group#member
    permission view = viewer + owner
}
";

#[tokio::test]
async fn test_list_resources_includes_definitions() {
    let backend = TestBackend::start().await;
    backend
        .json(paths::SCHEMA_READ, json!({"schemaText": SCHEMA}))
        .await;

    let resources = backend
        .tools
        .list_resources()
        .await
        .expect("listing should succeed");

    let uris: Vec<_> = resources.iter().map(|r| r.uri.as_str()).collect();
    assert_eq!(
        uris,
        [
            "schema://current",
            "relationships://",
            "definition://user",
            "definition://group",
            "definition://document",
        ]
    );
}

#[tokio::test]
async fn test_read_schema_resource() {
    let backend = TestBackend::start().await;
    backend
        .json(paths::SCHEMA_READ, json!({"schemaText": SCHEMA}))
        .await;

    let content = backend
        .tools
        .read_resource("schema://current")
        .await
        .expect("schema should be readable");

    assert_eq!(content.text, SCHEMA);
    assert_eq!(content.mime_type, "text/plain");
}

#[tokio::test]
async fn test_read_definition_resource() {
    let backend = TestBackend::start().await;
    backend
        .json(paths::SCHEMA_READ, json!({"schemaText": SCHEMA}))
        .await;

    let content = backend
        .tools
        .read_resource("definition://group")
        .await
        .expect("definition should be found");
    assert_eq!(
        content.text,
        "definition group {\n    relation member: user | group#member\n}"
    );

    let err = backend
        .tools
        .read_resource("definition://folder")
        .await
        .expect_err("unknown definition");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_read_filtered_relationships_resource() {
    let backend = TestBackend::start().await;
    backend
        .stream(
            paths::RELATIONSHIPS_READ,
            None,
            &[
                relationship_line("document:readme#viewer@group:eng#member", None),
                relationship_line("document:readme#viewer@user:alice", None),
            ],
        )
        .await;

    let content = backend
        .tools
        .read_resource("relationships://document/readme/viewer/*/*/")
        .await
        .expect("relationships should be readable");

    assert_eq!(
        content.text,
        "document:readme#viewer@group:eng#member\ndocument:readme#viewer@user:alice"
    );
    let bodies = backend.bodies(paths::RELATIONSHIPS_READ).await;
    assert_eq!(
        bodies[0]["relationshipFilter"],
        json!({"resourceType": "document", "optionalResourceId": "readme", "optionalRelation": "viewer"})
    );
}

#[tokio::test]
async fn test_unknown_resource_scheme() {
    let backend = TestBackend::start().await;

    let err = backend
        .tools
        .read_resource("prompt://explain")
        .await
        .expect_err("unknown scheme");

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(backend.request_count().await, 0);
}

#[tokio::test]
async fn test_missing_schema_is_api_error() {
    let backend = TestBackend::start().await;
    backend
        .fail(
            paths::SCHEMA_READ,
            404,
            r#"{"code":5,"message":"No schema has been defined"}"#,
        )
        .await;

    let err = backend
        .tools
        .list_resources()
        .await
        .expect_err("no schema");

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(404));
    assert!(err.body().is_some_and(|b| b.contains("No schema")));
}
