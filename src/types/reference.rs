//! Object and subject references.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifies a resource, or the object underlying a subject.
///
/// Serialized in the backend's wire shape `{"objectType": .., "objectId": ..}`
/// and displayed as `type:id`.
///
/// ```rust
/// use spicebridge::ObjectRef;
///
/// let doc = ObjectRef::new("document", "readme");
/// assert_eq!(doc.to_string(), "document:readme");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    /// The object type (e.g. "document").
    pub object_type: String,
    /// The object id (e.g. "readme").
    pub object_id: String,
}

impl ObjectRef {
    /// Creates a new object reference.
    pub fn new(object_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            object_id: object_id.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.object_id)
    }
}

/// The subject side of a relationship or check.
///
/// A subject with an `optional_relation` is a *computed* subject
/// ("members of group:eng") rather than a direct principal.
///
/// ```rust
/// use spicebridge::SubjectRef;
///
/// let alice = SubjectRef::new("user", "alice");
/// assert_eq!(alice.to_string(), "user:alice");
///
/// let members = SubjectRef::new("group", "eng").with_relation("member");
/// assert_eq!(members.to_string(), "group:eng#member");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    /// The underlying object.
    pub object: ObjectRef,
    /// Relation on the object, for computed subjects.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub optional_relation: Option<String>,
}

impl SubjectRef {
    /// Creates a direct subject reference.
    pub fn new(object_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            object: ObjectRef::new(object_type, object_id),
            optional_relation: None,
        }
    }

    /// Sets the subject relation, making this a computed subject.
    #[must_use]
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.optional_relation = Some(relation.into());
        self
    }

    /// Returns the subject relation, if any.
    pub fn relation(&self) -> Option<&str> {
        self.optional_relation.as_deref()
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.optional_relation {
            Some(ref relation) => write!(f, "{}#{}", self.object, relation),
            None => write!(f, "{}", self.object),
        }
    }
}

/// The JSON gateway may emit unset optional strings as `""`.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
