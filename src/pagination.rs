//! Cursor-driven draining of the backend's paginated list endpoints.
//!
//! Relationship reads, resource lookups and subject lookups share one loop,
//! parameterized by a [`PageSpec`]. The loop always drains to completion:
//! callers get one fully materialized, ordered sequence and never see a
//! cursor.
//!
//! ## Page shapes
//!
//! A page arrives in one of two shapes:
//!
//! - a sequence of `{"result": ITEM}` envelopes (newline-delimited, or a
//!   JSON array), each ITEM possibly carrying the continuation cursor;
//! - a bare ITEM (legacy), possibly carrying the cursor itself.
//!
//! Anything else, including an empty body, ends the drain with what has
//! been collected so far. An `{"error": ..}` envelope aborts it.
//!
//! ## Termination
//!
//! A sequence page continues the loop only if one of its recognized items
//! carried a cursor and the last such cursor differs from the one just
//! sent. Cursors on items failing the predicate, or on the envelope, are
//! ignored, so a backend answering cursor-bearing empty pages cannot hang
//! the drain.

use reqwest::Method;
use serde_json::{Map, Value};

use crate::client::paths;
use crate::transport::{ApiResponse, Transport};
use crate::Error;

/// Request field carrying the cursor of the previous page.
pub const CURSOR_PARAM: &str = "optionalCursor";

/// Describes one paginated endpoint.
#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    /// Request path.
    pub path: &'static str,
    /// Recognizes a valid result item.
    pub predicate: fn(&Value) -> bool,
    /// Field of a result item holding the continuation cursor.
    pub cursor_field: &'static str,
}

/// `/v1/relationships/read`
pub const READ_RELATIONSHIPS: PageSpec = PageSpec {
    path: paths::RELATIONSHIPS_READ,
    predicate: is_relationship_item,
    cursor_field: "afterResultCursor",
};

/// `/v1/permissions/resources`
pub const LOOKUP_RESOURCES: PageSpec = PageSpec {
    path: paths::PERMISSIONS_RESOURCES,
    predicate: is_resource_item,
    cursor_field: "afterResultCursor",
};

/// `/v1/permissions/subjects`
pub const LOOKUP_SUBJECTS: PageSpec = PageSpec {
    path: paths::PERMISSIONS_SUBJECTS,
    predicate: is_subject_item,
    cursor_field: "afterResultCursor",
};

fn is_relationship_item(item: &Value) -> bool {
    item.get("relationship").is_some_and(Value::is_object)
}

fn is_resource_item(item: &Value) -> bool {
    item.get("resourceObjectId").is_some_and(Value::is_string)
}

fn is_subject_item(item: &Value) -> bool {
    item.get("subject")
        .and_then(|s| s.get("subjectObjectId"))
        .is_some_and(Value::is_string)
}

/// Drains every page of `spec` for the query `params`.
///
/// `params` must be a JSON object; the cursor is added to a copy of it on
/// every page after the first. Pages are requested strictly one after
/// another. The first failing page aborts the whole drain.
pub async fn drain(
    transport: &dyn Transport,
    spec: &PageSpec,
    params: &Value,
) -> Result<Vec<Value>, Error> {
    let Value::Object(params) = params else {
        return Err(Error::validation("query parameters must be a JSON object"));
    };

    let mut cursor: Option<Value> = None;
    let mut results = Vec::new();
    let mut page = 0usize;

    loop {
        page += 1;
        let body = page_body(params, cursor.as_ref());
        let response = transport.request(Method::POST, spec.path, Some(&body)).await?;

        let envelopes = match response {
            ApiResponse::Many(values) => values,
            ApiResponse::Single(Value::Array(values)) => values,
            ApiResponse::Single(value) if is_envelope(&value) => vec![value],
            ApiResponse::Single(value) if (spec.predicate)(&value) => {
                // Legacy shape: the page is one bare item.
                let next = value.get(spec.cursor_field).filter(|c| !c.is_null()).cloned();
                results.push(value);
                tracing::debug!(path = spec.path, page, items = 1, cursor = next.is_some(), "legacy page");
                match next {
                    Some(next) if cursor.as_ref() != Some(&next) => {
                        cursor = Some(next);
                        continue;
                    }
                    _ => break,
                }
            }
            ApiResponse::Single(_) | ApiResponse::Empty => {
                tracing::debug!(path = spec.path, page, "no further results");
                break;
            }
        };

        let before = results.len();
        let mut page_cursor = None;
        for envelope in envelopes {
            if envelope.get("error").is_some() {
                return Err(Error::api(200, envelope.to_string()));
            }
            let Some(item) = envelope.get("result") else {
                continue;
            };
            if !(spec.predicate)(item) {
                continue;
            }
            if let Some(next) = item.get(spec.cursor_field).filter(|c| !c.is_null()) {
                page_cursor = Some(next.clone());
            }
            results.push(item.clone());
        }

        let added = results.len() - before;
        tracing::debug!(
            path = spec.path,
            page,
            items = added,
            cursor = page_cursor.is_some(),
            "page drained"
        );

        match page_cursor {
            None => break,
            Some(next) if cursor.as_ref() == Some(&next) => {
                tracing::warn!(path = spec.path, page, "cursor did not advance; stopping");
                break;
            }
            Some(next) => cursor = Some(next),
        }
    }

    Ok(results)
}

fn is_envelope(value: &Value) -> bool {
    value.get("result").is_some() || value.get("error").is_some()
}

fn page_body(params: &Map<String, Value>, cursor: Option<&Value>) -> Value {
    let mut body = params.clone();
    if let Some(cursor) = cursor {
        body.insert(CURSOR_PARAM.to_string(), cursor.clone());
    }
    Value::Object(body)
}
