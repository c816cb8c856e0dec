//! Typed tool arguments.
//!
//! Every struct accepts camelCase keys and treats missing and empty strings
//! alike. Required fields are checked when the params are turned into a
//! backend request, before any I/O.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;
use crate::types::{
    CheckRequest, Consistency, LookupResourcesRequest, LookupSubjectsRequest, ObjectRef,
    Operation, Relationship, RelationshipFilter, RelationshipUpdate, SubjectRef,
};

/// Decodes tool arguments, treating `null` as an empty object.
pub(crate) fn parse<P: DeserializeOwned>(args: Value) -> Result<P, Error> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args)
        .map_err(|err| Error::validation(format!("invalid arguments: {}", err)))
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, Error> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::missing_field(field)),
    }
}

fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn consistency(value: &Option<String>) -> Result<Consistency, Error> {
    optional(value).map_or(Ok(Consistency::default()), str::parse)
}

fn subject(
    subject_type: &Option<String>,
    subject_id: &Option<String>,
    subject_relation: &Option<String>,
) -> Result<SubjectRef, Error> {
    let subject = SubjectRef::new(
        required(subject_type, "subjectType")?,
        required(subject_id, "subjectId")?,
    );
    Ok(match optional(subject_relation) {
        Some(relation) => subject.with_relation(relation),
        None => subject,
    })
}

/// Arguments of `read-relationships`. Every filter field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadRelationshipsParams {
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub relation: Option<String>,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub subject_relation: Option<String>,
    pub consistency: Option<String>,
}

impl ReadRelationshipsParams {
    pub(crate) fn filter(&self) -> RelationshipFilter {
        RelationshipFilter::build(
            optional(&self.resource_type),
            optional(&self.resource_id),
            optional(&self.relation),
            optional(&self.subject_type),
            optional(&self.subject_id),
            optional(&self.subject_relation),
        )
    }

    pub(crate) fn consistency(&self) -> Result<Consistency, Error> {
        consistency(&self.consistency)
    }
}

/// Arguments of `check-permission`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckPermissionParams {
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub permission: Option<String>,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub subject_relation: Option<String>,
    pub consistency: Option<String>,
    /// Render the decision trace; defaults to true.
    pub explain: Option<bool>,
}

impl CheckPermissionParams {
    pub(crate) fn explain(&self) -> bool {
        self.explain.unwrap_or(true)
    }

    pub(crate) fn request(&self) -> Result<CheckRequest, Error> {
        let resource = ObjectRef::new(
            required(&self.resource_type, "resourceType")?,
            required(&self.resource_id, "resourceId")?,
        );
        let permission = required(&self.permission, "permission")?;
        let subject = subject(&self.subject_type, &self.subject_id, &self.subject_relation)?;

        Ok(CheckRequest::builder()
            .consistency(consistency(&self.consistency)?)
            .resource(resource)
            .permission(permission)
            .subject(subject)
            .with_tracing(self.explain())
            .build())
    }
}

/// Arguments of `lookup-resources`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupResourcesParams {
    pub resource_type: Option<String>,
    pub permission: Option<String>,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub subject_relation: Option<String>,
    pub consistency: Option<String>,
    /// Page-size hint; every page is still read.
    pub limit: Option<u32>,
}

impl LookupResourcesParams {
    pub(crate) fn request(&self) -> Result<LookupResourcesRequest, Error> {
        let resource_type = required(&self.resource_type, "resourceType")?;
        let permission = required(&self.permission, "permission")?;
        let subject = subject(&self.subject_type, &self.subject_id, &self.subject_relation)?;

        Ok(LookupResourcesRequest::builder()
            .consistency(consistency(&self.consistency)?)
            .resource_object_type(resource_type)
            .permission(permission)
            .subject(subject)
            .maybe_optional_limit(self.limit)
            .build())
    }
}

/// Arguments of `lookup-subjects`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupSubjectsParams {
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub permission: Option<String>,
    pub subject_type: Option<String>,
    pub subject_relation: Option<String>,
    pub consistency: Option<String>,
    pub limit: Option<u32>,
}

impl LookupSubjectsParams {
    pub(crate) fn request(&self) -> Result<LookupSubjectsRequest, Error> {
        let resource = ObjectRef::new(
            required(&self.resource_type, "resourceType")?,
            required(&self.resource_id, "resourceId")?,
        );
        let permission = required(&self.permission, "permission")?;
        let subject_type = required(&self.subject_type, "subjectType")?;

        Ok(LookupSubjectsRequest::builder()
            .consistency(consistency(&self.consistency)?)
            .resource(resource)
            .permission(permission)
            .subject_object_type(subject_type)
            .maybe_optional_subject_relation(optional(&self.subject_relation).map(String::from))
            .maybe_optional_concrete_limit(self.limit)
            .build())
    }
}

/// Arguments of `write-relationship`.
///
/// Either `relationship` in textual notation or the structured fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteRelationshipParams {
    pub relationship: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub relation: Option<String>,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub subject_relation: Option<String>,
    /// `touch` (default) or `create`.
    pub operation: Option<String>,
}

impl WriteRelationshipParams {
    pub(crate) fn update(&self) -> Result<RelationshipUpdate, Error> {
        let operation = match optional(&self.operation) {
            None => Operation::Touch,
            Some(text) => match text.parse()? {
                Operation::Delete => {
                    return Err(Error::validation(
                        "operation must be 'touch' or 'create'; use delete-relationships",
                    ));
                }
                op => op,
            },
        };

        let relationship = match optional(&self.relationship) {
            Some(text) => text.parse::<Relationship>()?,
            None => Relationship::build(
                optional(&self.resource_type).unwrap_or_default(),
                optional(&self.resource_id).unwrap_or_default(),
                optional(&self.relation).unwrap_or_default(),
                optional(&self.subject_type).unwrap_or_default(),
                optional(&self.subject_id).unwrap_or_default(),
                optional(&self.subject_relation),
            )?,
        };

        Ok(RelationshipUpdate::new(operation, relationship))
    }
}

/// Arguments of `write-schema`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WriteSchemaParams {
    pub schema: Option<String>,
}

impl WriteSchemaParams {
    pub(crate) fn schema(&self) -> Result<&str, Error> {
        required(&self.schema, "schema")
    }
}

/// Arguments of `delete-relationships`. `resourceType` is required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteRelationshipsParams {
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub relation: Option<String>,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub subject_relation: Option<String>,
}

impl DeleteRelationshipsParams {
    pub(crate) fn filter(&self) -> Result<RelationshipFilter, Error> {
        Ok(RelationshipFilter::build(
            Some(required(&self.resource_type, "resourceType")?),
            optional(&self.resource_id),
            optional(&self.relation),
            optional(&self.subject_type),
            optional(&self.subject_id),
            optional(&self.subject_relation),
        ))
    }
}

/// Arguments of `expand-permission`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpandPermissionParams {
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub permission: Option<String>,
    pub consistency: Option<String>,
}

impl ExpandPermissionParams {
    pub(crate) fn target(&self) -> Result<(ObjectRef, &str, Consistency), Error> {
        let resource = ObjectRef::new(
            required(&self.resource_type, "resourceType")?,
            required(&self.resource_id, "resourceId")?,
        );
        let permission = required(&self.permission, "permission")?;
        Ok((resource, permission, consistency(&self.consistency)?))
    }
}
