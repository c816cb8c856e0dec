//! Relationship query filters.

use serde::{Deserialize, Serialize};

/// Selects relationships for reads and bulk deletes.
///
/// Every field is independently optional; an empty filter matches everything.
///
/// ```rust
/// use spicebridge::RelationshipFilter;
///
/// let filter = RelationshipFilter::build(Some("document"), None, None, None, None, None);
/// assert_eq!(
///     serde_json::to_value(&filter).unwrap(),
///     serde_json::json!({"resourceType": "document"})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipFilter {
    /// Resource type to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Resource id to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_resource_id: Option<String>,
    /// Relation to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_relation: Option<String>,
    /// Subject constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_subject_filter: Option<SubjectFilter>,
}

/// Subject side of a [`RelationshipFilter`]. Always carries a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectFilter {
    /// Subject type to match.
    pub subject_type: String,
    /// Subject id to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_subject_id: Option<String>,
    /// Subject relation to match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_relation: Option<RelationFilter>,
}

/// Wrapper the backend expects around a subject relation in filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationFilter {
    /// The relation name.
    pub relation: String,
}

impl RelationshipFilter {
    /// Builds a filter from optional flat fields.
    ///
    /// Absent and empty arguments are omitted. Subject fields are only
    /// nested when `subject_type` is present; subject id and relation are
    /// dropped otherwise, since a subject filter without a type is invalid.
    pub fn build(
        resource_type: Option<&str>,
        resource_id: Option<&str>,
        relation: Option<&str>,
        subject_type: Option<&str>,
        subject_id: Option<&str>,
        subject_relation: Option<&str>,
    ) -> Self {
        let optional_subject_filter = present(subject_type).map(|subject_type| SubjectFilter {
            subject_type,
            optional_subject_id: present(subject_id),
            optional_relation: present(subject_relation).map(|relation| RelationFilter { relation }),
        });

        Self {
            resource_type: present(resource_type),
            optional_resource_id: present(resource_id),
            optional_relation: present(relation),
            optional_subject_filter,
        }
    }

    /// Returns `true` if the filter matches every relationship.
    pub fn is_empty(&self) -> bool {
        self.resource_type.is_none()
            && self.optional_resource_id.is_none()
            && self.optional_relation.is_none()
            && self.optional_subject_filter.is_none()
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}
