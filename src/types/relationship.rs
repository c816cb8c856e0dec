//! Relationship type representing an edge in the authorization graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ObjectRef, SubjectRef};
use crate::Error;

/// A relationship: "resource has relation to subject".
///
/// Relationships are never mutated in place. Writes create or touch them,
/// deletes remove them.
///
/// ## Textual Notation
///
/// `RESOURCE_TYPE:RESOURCE_ID#RELATION@SUBJECT_TYPE:SUBJECT_ID(#SUBJECT_RELATION)?`
///
/// ```rust
/// use spicebridge::Relationship;
///
/// let rel: Relationship = "document:readme#viewer@group:eng#member".parse().unwrap();
/// assert_eq!(rel.resource().to_string(), "document:readme");
/// assert_eq!(rel.relation(), "viewer");
/// assert_eq!(rel.subject().to_string(), "group:eng#member");
///
/// assert_eq!(rel.to_string(), "document:readme#viewer@group:eng#member");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    resource: ObjectRef,
    relation: String,
    subject: SubjectRef,
}

impl Relationship {
    /// Creates a relationship from its parts.
    pub fn new(resource: ObjectRef, relation: impl Into<String>, subject: SubjectRef) -> Self {
        Self {
            resource,
            relation: relation.into(),
            subject,
        }
    }

    /// Builds a relationship from flat fields, as supplied by tool parameters.
    ///
    /// Only checks that the required fields are non-empty; the backend does
    /// the authoritative validation against the schema.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spicebridge::Relationship;
    ///
    /// let rel = Relationship::build("document", "1", "viewer", "user", "alice", None).unwrap();
    /// assert_eq!(rel.to_string(), "document:1#viewer@user:alice");
    ///
    /// assert!(Relationship::build("document", "", "viewer", "user", "alice", None).is_err());
    /// ```
    pub fn build(
        resource_type: &str,
        resource_id: &str,
        relation: &str,
        subject_type: &str,
        subject_id: &str,
        subject_relation: Option<&str>,
    ) -> Result<Self, Error> {
        for (field, value) in [
            ("resourceType", resource_type),
            ("resourceId", resource_id),
            ("relation", relation),
            ("subjectType", subject_type),
            ("subjectId", subject_id),
        ] {
            if value.is_empty() {
                return Err(Error::missing_field(field));
            }
        }

        let mut subject = SubjectRef::new(subject_type, subject_id);
        if let Some(rel) = subject_relation.filter(|r| !r.is_empty()) {
            subject = subject.with_relation(rel);
        }

        Ok(Self::new(
            ObjectRef::new(resource_type, resource_id),
            relation,
            subject,
        ))
    }

    /// Returns the resource.
    #[inline]
    pub fn resource(&self) -> &ObjectRef {
        &self.resource
    }

    /// Returns the relation.
    #[inline]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Returns the subject.
    #[inline]
    pub fn subject(&self) -> &SubjectRef {
        &self.subject
    }

    /// Returns `true` if the subject is a computed subject (carries a relation).
    pub fn is_subject_set(&self) -> bool {
        self.subject.optional_relation.is_some()
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}@{}", self.resource, self.relation, self.subject)
    }
}

impl FromStr for Relationship {
    type Err = Error;

    /// Parses the textual notation.
    ///
    /// Fails with [`ErrorKind::Format`](crate::ErrorKind::Format) when the
    /// `#` separator is missing, the resource segment does not contain exactly
    /// one `:`, the part after the first `#` does not contain exactly one `@`,
    /// or the subject segment does not contain exactly one `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, rest) = s.split_once('#').ok_or_else(|| {
            Error::format(format!(
                "invalid relationship '{}': missing '#' separator",
                s
            ))
        })?;

        let (resource_type, resource_id) = split_object(s, resource, "resource")?;

        if rest.matches('@').count() != 1 {
            return Err(Error::format(format!(
                "invalid relationship '{}': expected exactly one '@' after the relation",
                s
            )));
        }
        let (relation, subject) = rest.split_once('@').unwrap_or((rest, ""));

        if relation.is_empty() || relation.contains('#') {
            return Err(Error::format(format!(
                "invalid relationship '{}': bad relation '{}'",
                s, relation
            )));
        }

        let (subject_object, subject_relation) = match subject.split_once('#') {
            Some((object, relation)) => (object, Some(relation)),
            None => (subject, None),
        };
        let (subject_type, subject_id) = split_object(s, subject_object, "subject")?;

        let mut subject = SubjectRef::new(subject_type, subject_id);
        if let Some(relation) = subject_relation {
            if relation.is_empty() || relation.contains('#') {
                return Err(Error::format(format!(
                    "invalid relationship '{}': bad subject relation '{}'",
                    s, relation
                )));
            }
            subject = subject.with_relation(relation);
        }

        Ok(Relationship::new(
            ObjectRef::new(resource_type, resource_id),
            relation,
            subject,
        ))
    }
}

/// Splits `type:id`, requiring exactly one `:` and two non-empty halves.
fn split_object<'s>(input: &str, segment: &'s str, what: &str) -> Result<(&'s str, &'s str), Error> {
    let malformed = || {
        Error::format(format!(
            "invalid relationship '{}': {} '{}' must be TYPE:ID",
            input, what, segment
        ))
    };

    if segment.matches(':').count() != 1 {
        return Err(malformed());
    }
    match segment.split_once(':') {
        Some((object_type, object_id)) if !object_type.is_empty() && !object_id.is_empty() => {
            Ok((object_type, object_id))
        }
        _ => Err(malformed()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_from_str() {
        let rel: Relationship = "document:readme#viewer@user:alice".parse().unwrap();
        assert_eq!(rel.resource(), &ObjectRef::new("document", "readme"));
        assert_eq!(rel.relation(), "viewer");
        assert_eq!(rel.subject(), &SubjectRef::new("user", "alice"));
        assert!(!rel.is_subject_set());
    }

    #[test]
    fn test_from_str_subject_set() {
        let rel: Relationship = "folder:reports#viewer@team:eng#member".parse().unwrap();
        assert_eq!(rel.subject().relation(), Some("member"));
        assert_eq!(rel.subject().object, ObjectRef::new("team", "eng"));
        assert!(rel.is_subject_set());
    }

    #[test_case("no-hash-or-at" ; "no separators")]
    #[test_case("a:b@c:d" ; "missing hash")]
    #[test_case("a:b#r@c" ; "subject missing colon")]
    #[test_case("ab#r@c:d" ; "resource missing colon")]
    #[test_case("a:b:c#r@c:d" ; "resource with two colons")]
    #[test_case("a:b#r" ; "missing at")]
    #[test_case("a:b#r@c:d@e:f" ; "two ats")]
    #[test_case("a:b#@c:d" ; "empty relation")]
    #[test_case("a:b#r@c:d#" ; "empty subject relation")]
    #[test_case("a:b#r@c:d#x#y" ; "third hash")]
    #[test_case(":b#r@c:d" ; "empty resource type")]
    #[test_case("a:b#r@c:" ; "empty subject id")]
    fn test_from_str_rejects(input: &str) {
        let err = input.parse::<Relationship>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_display() {
        let rel = Relationship::new(
            ObjectRef::new("document", "readme"),
            "viewer",
            SubjectRef::new("user", "alice"),
        );
        assert_eq!(rel.to_string(), "document:readme#viewer@user:alice");
    }

    #[test]
    fn test_build_skips_empty_subject_relation() {
        let rel = Relationship::build("doc", "1", "viewer", "user", "bob", Some("")).unwrap();
        assert!(!rel.is_subject_set());
    }

    #[test]
    fn test_build_requires_fields() {
        let err = Relationship::build("doc", "1", "", "user", "bob", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("relation"));
    }

    #[test]
    fn test_wire_shape() {
        let rel: Relationship = "doc:1#viewer@group:eng#member".parse().unwrap();
        let json = serde_json::to_value(&rel).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "resource": {"objectType": "doc", "objectId": "1"},
                "relation": "viewer",
                "subject": {
                    "object": {"objectType": "group", "objectId": "eng"},
                    "optionalRelation": "member"
                }
            })
        );
        let back: Relationship = serde_json::from_value(json).unwrap();
        assert_eq!(back, rel);
    }

    proptest! {
        #[test]
        fn notation_round_trips(
            rt in "[a-z][a-z0-9_]{0,8}",
            rid in "[a-zA-Z0-9_|-]{1,12}",
            rel in "[a-z][a-z_]{0,8}",
            st in "[a-z][a-z0-9_]{0,8}",
            sid in "[a-zA-Z0-9_|-]{1,12}",
            srel in proptest::option::of("[a-z][a-z_]{0,8}"),
        ) {
            let mut text = format!("{}:{}#{}@{}:{}", rt, rid, rel, st, sid);
            if let Some(ref srel) = srel {
                text.push('#');
                text.push_str(srel);
            }
            let parsed: Relationship = text.parse().unwrap();
            prop_assert_eq!(parsed.to_string(), text);
        }
    }
}
