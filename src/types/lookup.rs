//! Resource and subject lookup requests and results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Consistency, ObjectRef, SubjectRef};

/// Permissionship of a single lookup result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupPermissionship {
    /// Unconditionally granted.
    #[serde(rename = "LOOKUP_PERMISSIONSHIP_HAS_PERMISSION")]
    HasPermission,
    /// Granted only if caveat context is satisfied.
    #[serde(rename = "LOOKUP_PERMISSIONSHIP_CONDITIONAL_PERMISSION")]
    ConditionalPermission,
    /// Not reported.
    #[default]
    #[serde(other, rename = "LOOKUP_PERMISSIONSHIP_UNSPECIFIED")]
    Unspecified,
}

impl fmt::Display for LookupPermissionship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LookupPermissionship::HasPermission => "HAS_PERMISSION",
            LookupPermissionship::ConditionalPermission => "CONDITIONAL_PERMISSION",
            LookupPermissionship::Unspecified => "UNSPECIFIED",
        })
    }
}

/// Finds every resource of a type on which a subject holds a permission.
///
/// ```rust
/// use spicebridge::{LookupResourcesRequest, SubjectRef};
///
/// let request = LookupResourcesRequest::builder()
///     .resource_object_type("document")
///     .permission("view")
///     .subject(SubjectRef::new("user", "alice"))
///     .build();
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["resourceObjectType"], "document");
/// assert!(body.get("optionalLimit").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct LookupResourcesRequest {
    /// Read consistency.
    #[builder(default)]
    pub consistency: Consistency,
    /// Type of the resources to find.
    #[builder(into)]
    pub resource_object_type: String,
    /// Permission the subject must hold.
    #[builder(into)]
    pub permission: String,
    /// The subject.
    pub subject: SubjectRef,
    /// Page-size hint. Every page is still drained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_limit: Option<u32>,
}

/// Finds every subject of a type holding a permission on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct LookupSubjectsRequest {
    /// Read consistency.
    #[builder(default)]
    pub consistency: Consistency,
    /// The resource.
    pub resource: ObjectRef,
    /// Permission the subjects must hold.
    #[builder(into)]
    pub permission: String,
    /// Type of the subjects to find.
    #[builder(into)]
    pub subject_object_type: String,
    /// Restrict to computed subjects with this relation.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_subject_relation: Option<String>,
    /// Page-size hint. Every page is still drained.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_concrete_limit: Option<u32>,
}

/// One resource found by a resource lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResourceResult {
    /// Id of the resource; its type is the one that was looked up.
    pub resource_object_id: String,
    /// Whether access is unconditional.
    #[serde(default)]
    pub permissionship: LookupPermissionship,
}

/// One subject found by a subject lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "LookupSubjectWire")]
pub struct LookupSubjectResult {
    /// Id of the subject; its type is the one that was looked up.
    pub subject_object_id: String,
    /// Whether access is unconditional.
    pub permissionship: LookupPermissionship,
}

// The gateway nests the subject one level down: `{"subject": {..}}`.
#[derive(Deserialize)]
struct LookupSubjectWire {
    subject: ResolvedSubject,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedSubject {
    subject_object_id: String,
    #[serde(default)]
    permissionship: LookupPermissionship,
}

impl From<LookupSubjectWire> for LookupSubjectResult {
    fn from(wire: LookupSubjectWire) -> Self {
        Self {
            subject_object_id: wire.subject.subject_object_id,
            permissionship: wire.subject.permissionship,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_resource_result_from_wire() {
        let result: LookupResourceResult = serde_json::from_value(json!({
            "lookedUpAt": {"token": "abc"},
            "resourceObjectId": "readme",
            "permissionship": "LOOKUP_PERMISSIONSHIP_HAS_PERMISSION",
            "afterResultCursor": {"token": "next"}
        }))
        .unwrap();
        assert_eq!(result.resource_object_id, "readme");
        assert_eq!(result.permissionship, LookupPermissionship::HasPermission);
    }

    #[test]
    fn test_subject_result_from_wire() {
        let result: LookupSubjectResult = serde_json::from_value(json!({
            "subject": {
                "subjectObjectId": "alice",
                "permissionship": "LOOKUP_PERMISSIONSHIP_CONDITIONAL_PERMISSION"
            },
            "excludedSubjects": [],
            "afterResultCursor": {"token": "next"}
        }))
        .unwrap();
        assert_eq!(result.subject_object_id, "alice");
        assert_eq!(
            result.permissionship,
            LookupPermissionship::ConditionalPermission
        );
    }

    #[test]
    fn test_subjects_request_wire_shape() {
        let request = LookupSubjectsRequest::builder()
            .resource(ObjectRef::new("document", "readme"))
            .permission("view")
            .subject_object_type("user")
            .consistency(Consistency::MinimizeLatency)
            .optional_concrete_limit(50)
            .build();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "consistency": {"minimizeLatency": true},
                "resource": {"objectType": "document", "objectId": "readme"},
                "permission": "view",
                "subjectObjectType": "user",
                "optionalConcreteLimit": 50
            })
        );
    }
}
