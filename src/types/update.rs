//! Relationship write batches.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::Relationship;
use crate::Error;

/// What a [`RelationshipUpdate`] does to its relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    /// Upsert: create, or leave an existing relationship in place.
    #[default]
    #[serde(rename = "OPERATION_TOUCH")]
    Touch,
    /// Create; the backend fails the batch if it already exists.
    #[serde(rename = "OPERATION_CREATE")]
    Create,
    /// Delete, if present.
    #[serde(rename = "OPERATION_DELETE")]
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Touch => "touch",
            Operation::Create => "create",
            Operation::Delete => "delete",
        })
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "touch" => Ok(Operation::Touch),
            "create" => Ok(Operation::Create),
            "delete" => Ok(Operation::Delete),
            other => Err(Error::validation(format!(
                "unknown operation '{}': expected 'touch', 'create' or 'delete'",
                other
            ))),
        }
    }
}

/// One entry of a write batch.
///
/// ```rust
/// use spicebridge::{Relationship, RelationshipUpdate};
///
/// let rel: Relationship = "document:1#viewer@user:alice".parse().unwrap();
/// let update = RelationshipUpdate::touch(rel);
/// let json = serde_json::to_value(&update).unwrap();
/// assert_eq!(json["operation"], "OPERATION_TOUCH");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipUpdate {
    /// The operation.
    pub operation: Operation,
    /// The relationship it applies to.
    pub relationship: Relationship,
}

impl RelationshipUpdate {
    /// Creates an update.
    pub fn new(operation: Operation, relationship: Relationship) -> Self {
        Self {
            operation,
            relationship,
        }
    }

    /// Upserts the relationship.
    pub fn touch(relationship: Relationship) -> Self {
        Self::new(Operation::Touch, relationship)
    }

    /// Creates the relationship.
    pub fn create(relationship: Relationship) -> Self {
        Self::new(Operation::Create, relationship)
    }

    /// Deletes the relationship.
    pub fn delete(relationship: Relationship) -> Self {
        Self::new(Operation::Delete, relationship)
    }
}
