//! Tool dispatch against a mock backend.

use serde_json::json;
use spicebridge::client::paths;
use spicebridge::tools::names;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{API_KEY, TestBackend, relationship_line, resource_line};

#[tokio::test]
async fn test_read_schema_sends_bearer_token() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path(paths::SCHEMA_READ))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "readAt": {"token": "r1"},
            "schemaText": "definition user {}"
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let output = backend.tools.call(names::READ_SCHEMA, json!({})).await;

    assert!(!output.is_error, "{}", output.text);
    assert_eq!(output.text, "definition user {}");
}

#[tokio::test]
async fn test_read_relationships_drains_three_pages() {
    let backend = TestBackend::start().await;
    backend
        .stream(
            paths::RELATIONSHIPS_READ,
            None,
            &[
                relationship_line("doc:1#viewer@user:a", None),
                relationship_line("doc:1#viewer@user:b", Some("p1")),
            ],
        )
        .await;
    backend
        .stream(
            paths::RELATIONSHIPS_READ,
            Some("p1"),
            &[relationship_line("doc:1#owner@user:c", Some("p2"))],
        )
        .await;
    backend
        .stream(
            paths::RELATIONSHIPS_READ,
            Some("p2"),
            &[relationship_line("doc:1#viewer@group:eng#member", None)],
        )
        .await;

    let output = backend
        .tools
        .call(
            names::READ_RELATIONSHIPS,
            json!({"resourceType": "doc", "resourceId": "1", "consistency": "minimize_latency"}),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
    assert_eq!(
        output.text,
        "Found 4 relationship(s):\n\
         doc:1#viewer@user:a\n\
         doc:1#viewer@user:b\n\
         doc:1#owner@user:c\n\
         doc:1#viewer@group:eng#member"
    );

    let bodies = backend.bodies(paths::RELATIONSHIPS_READ).await;
    assert_eq!(bodies.len(), 3);
    assert_eq!(
        bodies[0],
        json!({
            "consistency": {"minimizeLatency": true},
            "relationshipFilter": {"resourceType": "doc", "optionalResourceId": "1"}
        })
    );
    assert_eq!(bodies[1]["optionalCursor"], json!({"token": "p1"}));
    assert_eq!(bodies[2]["optionalCursor"], json!({"token": "p2"}));
}

#[tokio::test]
async fn test_empty_pages_with_cursor_terminate() {
    let backend = TestBackend::start().await;
    // Every page: no results, a cursor. An unguarded loop would never end.
    backend
        .json(
            paths::PERMISSIONS_RESOURCES,
            json!([{"result": {"afterResultCursor": {"token": "forever"}}}]),
        )
        .await;

    let output = backend
        .tools
        .call(
            names::LOOKUP_RESOURCES,
            json!({"resourceType": "doc", "permission": "view", "subjectType": "user", "subjectId": "alice"}),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
    assert_eq!(output.text, "No doc resources with permission 'view'.");
    assert_eq!(backend.request_count().await, 1);
}

#[tokio::test]
async fn test_lookup_resources_across_pages() {
    let backend = TestBackend::start().await;
    backend
        .stream(
            paths::PERMISSIONS_RESOURCES,
            None,
            &[resource_line("a", None), resource_line("b", Some("c1"))],
        )
        .await;
    backend
        .stream(paths::PERMISSIONS_RESOURCES, Some("c1"), &[resource_line("c", None)])
        .await;

    let output = backend
        .tools
        .call(
            names::LOOKUP_RESOURCES,
            json!({
                "resourceType": "doc",
                "permission": "view",
                "subjectType": "user",
                "subjectId": "alice",
                "limit": 2
            }),
        )
        .await;

    assert_eq!(
        output.text,
        "Found 3 doc resource(s) with permission 'view':\n- doc:a\n- doc:b\n- doc:c"
    );
    let bodies = backend.bodies(paths::PERMISSIONS_RESOURCES).await;
    assert_eq!(bodies[0]["optionalLimit"], 2);
    assert_eq!(bodies[0]["subject"], json!({"object": {"objectType": "user", "objectId": "alice"}}));
}

#[tokio::test]
async fn test_lookup_subjects() {
    let backend = TestBackend::start().await;
    backend
        .stream(
            paths::PERMISSIONS_SUBJECTS,
            None,
            &[
                json!({"result": {"subject": {"subjectObjectId": "alice", "permissionship": "LOOKUP_PERMISSIONSHIP_HAS_PERMISSION"}}}),
                json!({"result": {"subject": {"subjectObjectId": "bob", "permissionship": "LOOKUP_PERMISSIONSHIP_CONDITIONAL_PERMISSION"}}}),
            ],
        )
        .await;

    let output = backend
        .tools
        .call(
            names::LOOKUP_SUBJECTS,
            json!({"resourceType": "doc", "resourceId": "1", "permission": "view", "subjectType": "user"}),
        )
        .await;

    assert_eq!(
        output.text,
        "Found 2 user subject(s) with permission 'view':\n- user:alice\n- user:bob (conditional)"
    );
}

#[tokio::test]
async fn test_check_permission_with_trace() {
    let backend = TestBackend::start().await;
    backend
        .json(
            paths::PERMISSIONS_CHECK,
            json!({
                "checkedAt": {"token": "c9"},
                "permissionship": "PERMISSIONSHIP_HAS_PERMISSION",
                "debugTrace": {"check": {
                    "resource": {"objectType": "doc", "objectId": "1"},
                    "permission": "view",
                    "permissionType": "PERMISSION_TYPE_PERMISSION",
                    "subject": {"object": {"objectType": "user", "objectId": "alice"}},
                    "result": "PERMISSIONSHIP_HAS_PERMISSION",
                    "duration": "0.000120s",
                    "subProblems": {"traces": [
                        {
                            "resource": {"objectType": "doc", "objectId": "1"},
                            "permission": "owner",
                            "permissionType": "PERMISSION_TYPE_RELATION",
                            "subject": {"object": {"objectType": "user", "objectId": "alice"}},
                            "result": "PERMISSIONSHIP_NO_PERMISSION"
                        },
                        {
                            "resource": {"objectType": "doc", "objectId": "1"},
                            "permission": "viewer",
                            "permissionType": "PERMISSION_TYPE_RELATION",
                            "subject": {"object": {"objectType": "user", "objectId": "alice"}},
                            "result": "PERMISSIONSHIP_HAS_PERMISSION"
                        }
                    ]}
                }}
            }),
        )
        .await;

    let output = backend
        .tools
        .call(
            names::CHECK_PERMISSION,
            json!({
                "resourceType": "doc",
                "resourceId": "1",
                "permission": "view",
                "subjectType": "user",
                "subjectId": "alice"
            }),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
    assert_eq!(
        output.text,
        "doc:1#view@user:alice: HAS_PERMISSION\n\
         Checked at: c9\n\
         \n\
         Explanation:\n\
         permission view on doc:1 for user:alice: HAS_PERMISSION\n\
         Duration: 0.000120s\n\
         This was determined by:\n  \
         relation owner on doc:1 for user:alice: NO_PERMISSION\n  \
         relation viewer on doc:1 for user:alice: HAS_PERMISSION"
    );

    let bodies = backend.bodies(paths::PERMISSIONS_CHECK).await;
    assert_eq!(bodies[0]["withTracing"], true);
    assert_eq!(bodies[0]["consistency"], json!({"fullyConsistent": true}));
}

#[tokio::test]
async fn test_write_relationship_from_fields() {
    let backend = TestBackend::start().await;
    backend
        .json(paths::RELATIONSHIPS_WRITE, json!({"writtenAt": {"token": "w7"}}))
        .await;

    let output = backend
        .tools
        .call(
            names::WRITE_RELATIONSHIP,
            json!({
                "resourceType": "doc",
                "resourceId": "1",
                "relation": "viewer",
                "subjectType": "group",
                "subjectId": "eng",
                "subjectRelation": "member",
                "operation": "create"
            }),
        )
        .await;

    assert_eq!(
        output.text,
        "Relationship doc:1#viewer@group:eng#member (create) (revision w7)."
    );
    let bodies = backend.bodies(paths::RELATIONSHIPS_WRITE).await;
    assert_eq!(
        bodies[0],
        json!({"updates": [{
            "operation": "OPERATION_CREATE",
            "relationship": {
                "resource": {"objectType": "doc", "objectId": "1"},
                "relation": "viewer",
                "subject": {"object": {"objectType": "group", "objectId": "eng"}, "optionalRelation": "member"}
            }
        }]})
    );
}

#[tokio::test]
async fn test_malformed_relationship_never_reaches_backend() {
    let backend = TestBackend::start().await;

    for text in ["no-hash-or-at", "a:b@c:d", "a:b#r@c"] {
        let output = backend
            .tools
            .call(names::WRITE_RELATIONSHIP, json!({"relationship": text}))
            .await;
        assert!(output.is_error, "{} should be rejected", text);
        assert!(output.text.starts_with("format error"), "{}", output.text);
    }
    assert_eq!(backend.request_count().await, 0);
}

#[tokio::test]
async fn test_delete_relationships() {
    let backend = TestBackend::start().await;
    backend
        .json(paths::RELATIONSHIPS_DELETE, json!({"deletedAt": {"token": "d3"}}))
        .await;

    let output = backend
        .tools
        .call(
            names::DELETE_RELATIONSHIPS,
            json!({"resourceType": "doc", "subjectType": "user", "subjectId": "bob"}),
        )
        .await;

    assert_eq!(output.text, "Relationships deleted (revision d3).");
    let bodies = backend.bodies(paths::RELATIONSHIPS_DELETE).await;
    assert_eq!(
        bodies[0],
        json!({"relationshipFilter": {
            "resourceType": "doc",
            "optionalSubjectFilter": {"subjectType": "user", "optionalSubjectId": "bob"}
        }})
    );
}

#[tokio::test]
async fn test_write_schema() {
    let backend = TestBackend::start().await;
    backend
        .json(paths::SCHEMA_WRITE, json!({"writtenAt": {"token": "s2"}}))
        .await;

    let output = backend
        .tools
        .call(names::WRITE_SCHEMA, json!({"schema": "definition user {}"}))
        .await;

    assert_eq!(output.text, "Schema written (revision s2).");
    assert_eq!(
        backend.bodies(paths::SCHEMA_WRITE).await[0],
        json!({"schema": "definition user {}"})
    );
}

#[tokio::test]
async fn test_expand_permission() {
    let backend = TestBackend::start().await;
    backend
        .json(
            paths::PERMISSIONS_EXPAND,
            json!({
                "expandedAt": {"token": "e1"},
                "treeRoot": {
                    "expandedObject": {"objectType": "doc", "objectId": "1"},
                    "expandedRelation": "view",
                    "intermediate": {
                        "operation": "OPERATION_UNION",
                        "children": [{
                            "expandedObject": {"objectType": "doc", "objectId": "1"},
                            "expandedRelation": "viewer",
                            "leaf": {"subjects": [
                                {"object": {"objectType": "user", "objectId": "alice"}},
                                {"object": {"objectType": "group", "objectId": "eng"}, "optionalRelation": "member"}
                            ]}
                        }]
                    }
                }
            }),
        )
        .await;

    let output = backend
        .tools
        .call(
            names::EXPAND_PERMISSION,
            json!({"resourceType": "doc", "resourceId": "1", "permission": "view"}),
        )
        .await;

    assert!(!output.is_error, "{}", output.text);
    assert_eq!(
        output.text,
        "doc:1#view (union)\n  doc:1#viewer: user:alice, group:eng#member"
    );
}

#[tokio::test]
async fn test_backend_error_is_reported() {
    let backend = TestBackend::start().await;
    backend
        .fail(
            paths::PERMISSIONS_CHECK,
            400,
            r#"{"code":3,"message":"object definition `doc` not found"}"#,
        )
        .await;

    let output = backend
        .tools
        .call(
            names::CHECK_PERMISSION,
            json!({
                "resourceType": "doc",
                "resourceId": "1",
                "permission": "view",
                "subjectType": "user",
                "subjectId": "alice"
            }),
        )
        .await;

    assert!(output.is_error);
    assert!(output.text.contains("HTTP 400"), "{}", output.text);
    assert!(output.text.contains("object definition `doc` not found"));
}

#[tokio::test]
async fn test_in_stream_error_aborts_read() {
    let backend = TestBackend::start().await;
    backend
        .stream(
            paths::RELATIONSHIPS_READ,
            None,
            &[
                relationship_line("doc:1#viewer@user:a", None),
                json!({"error": {"code": 4, "message": "deadline exceeded"}}),
            ],
        )
        .await;

    let output = backend
        .tools
        .call(names::READ_RELATIONSHIPS, json!({"resourceType": "doc"}))
        .await;

    assert!(output.is_error);
    assert!(output.text.contains("deadline exceeded"), "{}", output.text);
}
