//! Backend operations, one per gateway endpoint.

use serde::Deserialize;
use serde_json::{Value, json};

use super::Client;
use crate::error::{Error, ErrorKind};
use crate::pagination::{self, LOOKUP_RESOURCES, LOOKUP_SUBJECTS, READ_RELATIONSHIPS};
use crate::types::{
    CheckRequest, CheckResponse, CheckResult, Consistency, LookupResourceResult,
    LookupResourcesRequest, LookupSubjectResult, LookupSubjectsRequest, ObjectRef, PermissionTree,
    Relationship, RelationshipFilter, RelationshipUpdate, ZedToken,
};

/// Gateway paths.
pub mod paths {
    /// Fetch schema text.
    pub const SCHEMA_READ: &str = "/v1/schema/read";
    /// Persist schema text.
    pub const SCHEMA_WRITE: &str = "/v1/schema/write";
    /// Paginated relationship query.
    pub const RELATIONSHIPS_READ: &str = "/v1/relationships/read";
    /// Relationship write batch.
    pub const RELATIONSHIPS_WRITE: &str = "/v1/relationships/write";
    /// Filtered bulk delete.
    pub const RELATIONSHIPS_DELETE: &str = "/v1/relationships/delete";
    /// Single permission decision.
    pub const PERMISSIONS_CHECK: &str = "/v1/permissions/check";
    /// Paginated resource lookup.
    pub const PERMISSIONS_RESOURCES: &str = "/v1/permissions/resources";
    /// Paginated subject lookup.
    pub const PERMISSIONS_SUBJECTS: &str = "/v1/permissions/subjects";
    /// Permission tree expansion.
    pub const PERMISSIONS_EXPAND: &str = "/v1/permissions/expand";
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadSchemaResponse {
    #[serde(default)]
    schema_text: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WrittenAt {
    #[serde(default)]
    written_at: Option<ZedToken>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletedAt {
    #[serde(default)]
    deleted_at: Option<ZedToken>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpandResponse {
    #[serde(default)]
    tree_root: Option<PermissionTree>,
}

#[derive(Deserialize)]
struct RelationshipItem {
    relationship: Relationship,
}

impl Client {
    /// Fetches the current schema text.
    ///
    /// An unset schema is reported by the backend as an API error.
    pub async fn read_schema(&self) -> Result<String, Error> {
        let response: ReadSchemaResponse = self
            .inner()
            .unary_as(paths::SCHEMA_READ, &json!({}))
            .await?;
        Ok(response.schema_text)
    }

    /// Replaces the schema.
    ///
    /// Returns the write revision, when the backend reports one.
    pub async fn write_schema(&self, schema: &str) -> Result<Option<ZedToken>, Error> {
        if schema.trim().is_empty() {
            return Err(Error::missing_field("schema"));
        }
        let response: WrittenAt = self
            .inner()
            .unary_as(paths::SCHEMA_WRITE, &json!({ "schema": schema }))
            .await?;
        Ok(response.written_at)
    }

    /// Reads every relationship matching `filter`, across all pages.
    pub async fn read_relationships(
        &self,
        filter: &RelationshipFilter,
        consistency: Consistency,
    ) -> Result<Vec<Relationship>, Error> {
        let params = json!({
            "consistency": consistency,
            "relationshipFilter": filter,
        });
        let items = pagination::drain(self.transport().as_ref(), &READ_RELATIONSHIPS, &params).await?;
        items
            .into_iter()
            .map(|item| Ok(serde_json::from_value::<RelationshipItem>(item)?.relationship))
            .collect()
    }

    /// Applies a batch of updates atomically.
    pub async fn write_relationships(
        &self,
        updates: &[RelationshipUpdate],
    ) -> Result<Option<ZedToken>, Error> {
        if updates.is_empty() {
            return Err(Error::validation("at least one relationship update is required"));
        }
        let response: WrittenAt = self
            .inner()
            .unary_as(paths::RELATIONSHIPS_WRITE, &json!({ "updates": updates }))
            .await?;
        Ok(response.written_at)
    }

    /// Deletes every relationship matching `filter`.
    ///
    /// The filter must name a resource type, so an empty filter can never
    /// wipe the whole graph.
    pub async fn delete_relationships(
        &self,
        filter: &RelationshipFilter,
    ) -> Result<Option<ZedToken>, Error> {
        if filter.resource_type.is_none() {
            return Err(Error::missing_field("resourceType"));
        }
        let response: DeletedAt = self
            .inner()
            .unary_as(paths::RELATIONSHIPS_DELETE, &json!({ "relationshipFilter": filter }))
            .await?;
        Ok(response.deleted_at)
    }

    /// Checks one permission, optionally with a decision trace.
    pub async fn check_permission(&self, request: &CheckRequest) -> Result<CheckResult, Error> {
        let body = serde_json::to_value(request)?;
        let response: CheckResponse = self
            .inner()
            .unary_as(paths::PERMISSIONS_CHECK, &body)
            .await?;
        Ok(response.into())
    }

    /// Finds every resource the subject holds the permission on, across all pages.
    pub async fn lookup_resources(
        &self,
        request: &LookupResourcesRequest,
    ) -> Result<Vec<LookupResourceResult>, Error> {
        let params = serde_json::to_value(request)?;
        decode_all(pagination::drain(self.transport().as_ref(), &LOOKUP_RESOURCES, &params).await?)
    }

    /// Finds every subject holding the permission on the resource, across all pages.
    pub async fn lookup_subjects(
        &self,
        request: &LookupSubjectsRequest,
    ) -> Result<Vec<LookupSubjectResult>, Error> {
        let params = serde_json::to_value(request)?;
        decode_all(pagination::drain(self.transport().as_ref(), &LOOKUP_SUBJECTS, &params).await?)
    }

    /// Expands the membership tree of a permission on a resource.
    pub async fn expand_permission(
        &self,
        resource: &ObjectRef,
        permission: &str,
        consistency: Consistency,
    ) -> Result<PermissionTree, Error> {
        let body = json!({
            "consistency": consistency,
            "resource": resource,
            "permission": permission,
        });
        let response: ExpandResponse = self
            .inner()
            .unary_as(paths::PERMISSIONS_EXPAND, &body)
            .await?;
        response.tree_root.ok_or_else(|| {
            Error::new(
                ErrorKind::Parse,
                format!("expand response for {} has no tree", resource),
            )
        })
    }
}

fn decode_all<T>(items: Vec<Value>) -> Result<Vec<T>, Error>
where
    T: serde::de::DeserializeOwned,
{
    items
        .into_iter()
        .map(|item| Ok(serde_json::from_value(item)?))
        .collect()
}
