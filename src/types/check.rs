//! Permission check request and result types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Consistency, DecisionTrace, ObjectRef, SubjectRef, ZedToken};

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permissionship {
    /// The subject has the permission.
    #[serde(rename = "PERMISSIONSHIP_HAS_PERMISSION")]
    HasPermission,
    /// The subject does not have the permission.
    #[serde(rename = "PERMISSIONSHIP_NO_PERMISSION")]
    NoPermission,
    /// The answer depends on caveat context that was not supplied.
    #[serde(rename = "PERMISSIONSHIP_CONDITIONAL_PERMISSION")]
    ConditionalPermission,
    /// Not reported.
    #[default]
    #[serde(other, rename = "PERMISSIONSHIP_UNSPECIFIED")]
    Unspecified,
}

impl Permissionship {
    /// Returns `true` only for an unconditional grant.
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Permissionship::HasPermission)
    }
}

impl fmt::Display for Permissionship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Permissionship::HasPermission => "HAS_PERMISSION",
            Permissionship::NoPermission => "NO_PERMISSION",
            Permissionship::ConditionalPermission => "CONDITIONAL_PERMISSION",
            Permissionship::Unspecified => "UNSPECIFIED",
        })
    }
}

/// A single permission check.
///
/// ```rust
/// use spicebridge::{CheckRequest, ObjectRef, SubjectRef};
///
/// let request = CheckRequest::builder()
///     .resource(ObjectRef::new("document", "readme"))
///     .permission("view")
///     .subject(SubjectRef::new("user", "alice"))
///     .with_tracing(true)
///     .build();
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["withTracing"], true);
/// assert_eq!(body["consistency"], serde_json::json!({"fullyConsistent": true}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    /// Read consistency.
    #[builder(default)]
    pub consistency: Consistency,
    /// The resource being accessed.
    pub resource: ObjectRef,
    /// The permission to check.
    #[builder(into)]
    pub permission: String,
    /// The subject whose access is checked.
    pub subject: SubjectRef,
    /// Ask the backend for a decision trace.
    #[builder(default)]
    pub with_tracing: bool,
}

/// The decoded answer to a [`CheckRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// The decision.
    pub permissionship: Permissionship,
    /// Snapshot the decision was evaluated at.
    pub checked_at: Option<ZedToken>,
    /// Root of the decision trace, when tracing was requested.
    pub trace: Option<DecisionTrace>,
    /// Caveat context names the backend still needs, for conditional answers.
    pub missing_context: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckResponse {
    #[serde(default)]
    checked_at: Option<ZedToken>,
    #[serde(default)]
    permissionship: Permissionship,
    #[serde(default)]
    partial_caveat_info: Option<PartialCaveatInfo>,
    #[serde(default)]
    debug_trace: Option<DebugInformation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialCaveatInfo {
    #[serde(default)]
    missing_required_context: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DebugInformation {
    #[serde(default)]
    check: Option<DecisionTrace>,
}

impl From<CheckResponse> for CheckResult {
    fn from(response: CheckResponse) -> Self {
        Self {
            permissionship: response.permissionship,
            checked_at: response.checked_at,
            trace: response.debug_trace.and_then(|d| d.check),
            missing_context: response
                .partial_caveat_info
                .map(|p| p.missing_required_context)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_traced_response() {
        let response: CheckResponse = serde_json::from_value(json!({
            "checkedAt": {"token": "GhUKEzE3"},
            "permissionship": "PERMISSIONSHIP_HAS_PERMISSION",
            "debugTrace": {
                "check": {
                    "resource": {"objectType": "document", "objectId": "1"},
                    "permission": "view",
                    "permissionType": "PERMISSION_TYPE_PERMISSION",
                    "subject": {"object": {"objectType": "user", "objectId": "alice"}},
                    "result": "PERMISSIONSHIP_HAS_PERMISSION"
                },
                "schemaUsed": "definition user {}"
            }
        }))
        .unwrap();

        let result = CheckResult::from(response);
        assert!(result.permissionship.is_allowed());
        assert_eq!(result.checked_at, Some(ZedToken::new("GhUKEzE3")));
        assert_eq!(result.trace.unwrap().permission, "view");
        assert!(result.missing_context.is_empty());
    }

    #[test]
    fn test_decode_conditional_response() {
        let response: CheckResponse = serde_json::from_value(json!({
            "permissionship": "PERMISSIONSHIP_CONDITIONAL_PERMISSION",
            "partialCaveatInfo": {"missingRequiredContext": ["ip_address"]}
        }))
        .unwrap();

        let result = CheckResult::from(response);
        assert_eq!(result.permissionship, Permissionship::ConditionalPermission);
        assert!(!result.permissionship.is_allowed());
        assert_eq!(result.missing_context, vec!["ip_address".to_string()]);
        assert!(result.trace.is_none());
    }

    #[test]
    fn test_permissionship_display() {
        assert_eq!(Permissionship::HasPermission.to_string(), "HAS_PERMISSION");
        assert_eq!(Permissionship::NoPermission.to_string(), "NO_PERMISSION");
        let unknown: Permissionship = serde_json::from_value(json!("PERMISSIONSHIP_NEW")).unwrap();
        assert_eq!(unknown, Permissionship::Unspecified);
    }

    #[test]
    fn test_request_defaults() {
        let request = CheckRequest::builder()
            .resource(ObjectRef::new("doc", "1"))
            .permission("view")
            .subject(SubjectRef::new("user", "bob"))
            .build();
        assert_eq!(request.consistency, Consistency::FullyConsistent);
        assert!(!request.with_tracing);
    }
}
