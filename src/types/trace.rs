//! Decision traces returned by traced permission checks.

use serde::{Deserialize, Serialize};

use super::{ObjectRef, SubjectRef};

/// Prefix the backend puts on every check result tag.
const RESULT_PREFIX: &str = "PERMISSIONSHIP_";

/// One node of the recursive record of sub-decisions behind a check.
///
/// Produced wholesale by a single check call and consumed once by
/// [`render_trace`](crate::explain::render_trace). Unknown wire fields are
/// ignored and missing ones fall back to their defaults, so a partially
/// populated node still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTrace {
    /// The resource this sub-decision was evaluated on.
    #[serde(default)]
    pub resource: ObjectRef,
    /// The permission or relation evaluated.
    #[serde(default)]
    pub permission: String,
    /// Whether `permission` names a permission or a relation.
    #[serde(default)]
    pub permission_type: PermissionType,
    /// The subject the sub-decision was evaluated for.
    #[serde(default)]
    pub subject: SubjectRef,
    /// Raw result tag, e.g. `PERMISSIONSHIP_HAS_PERMISSION`.
    #[serde(default)]
    pub result: String,
    /// Evaluation time as reported by the backend, e.g. `0.000123s`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Child decisions, in the backend's evaluation order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_problems: Option<SubProblems>,
}

/// Container for child traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubProblems {
    /// Child traces in evaluation order.
    #[serde(default)]
    pub traces: Vec<DecisionTrace>,
}

impl DecisionTrace {
    /// Returns the result tag without the backend-internal prefix.
    ///
    /// ```rust
    /// use spicebridge::DecisionTrace;
    ///
    /// let trace = DecisionTrace {
    ///     result: "PERMISSIONSHIP_HAS_PERMISSION".into(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(trace.outcome(), "HAS_PERMISSION");
    /// ```
    pub fn outcome(&self) -> &str {
        self.result
            .strip_prefix(RESULT_PREFIX)
            .unwrap_or(&self.result)
    }

    /// Returns the child traces, empty when the node is a leaf.
    pub fn children(&self) -> &[DecisionTrace] {
        self.sub_problems
            .as_ref()
            .map(|s| s.traces.as_slice())
            .unwrap_or(&[])
    }
}

/// Kind of the evaluated name in a trace node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionType {
    /// A computed permission.
    #[serde(rename = "PERMISSION_TYPE_PERMISSION")]
    Permission,
    /// A stored relation.
    #[serde(rename = "PERMISSION_TYPE_RELATION")]
    Relation,
    /// Not reported.
    #[default]
    #[serde(other, rename = "PERMISSION_TYPE_UNSPECIFIED")]
    Unspecified,
}

impl PermissionType {
    /// Human label: `"permission"` for the permission variant, `"relation"` otherwise.
    pub fn label(self) -> &'static str {
        match self {
            PermissionType::Permission => "permission",
            PermissionType::Relation | PermissionType::Unspecified => "relation",
        }
    }
}
