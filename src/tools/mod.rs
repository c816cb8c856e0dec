//! Tool dispatch.
//!
//! [`Tools`] binds the client operations to the capability names an agent
//! calls. Arguments arrive as a JSON object; every outcome, failures
//! included, leaves as a [`ToolOutput`]. Failures are also logged with
//! `tracing::warn!`, so the structured response and the diagnostic stream
//! stay independent.
//!
//! ```rust,no_run
//! use spicebridge::{Client, Config, Tools};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), spicebridge::Error> {
//! let tools = Tools::new(Client::from_config(&Config::from_env())?);
//! let output = tools
//!     .call(
//!         "check-permission",
//!         json!({
//!             "resourceType": "document",
//!             "resourceId": "readme",
//!             "permission": "view",
//!             "subjectType": "user",
//!             "subjectId": "alice"
//!         }),
//!     )
//!     .await;
//! println!("{}", output.text);
//! # Ok(())
//! # }
//! ```

mod format;
mod params;
mod resources;

pub use resources::{ResourceContent, ResourceInfo, SCHEMA_URI};

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::Error;
use crate::Client;
use params::{
    CheckPermissionParams, DeleteRelationshipsParams, ExpandPermissionParams,
    LookupResourcesParams, LookupSubjectsParams, ReadRelationshipsParams, WriteRelationshipParams,
    WriteSchemaParams,
};

/// Capability names accepted by [`Tools::call`].
pub mod names {
    /// Read the schema text.
    pub const READ_SCHEMA: &str = "read-schema";
    /// List relationships matching optional filter fields.
    pub const READ_RELATIONSHIPS: &str = "read-relationships";
    /// Check one permission, with an optional explanation.
    pub const CHECK_PERMISSION: &str = "check-permission";
    /// Find resources a subject can reach.
    pub const LOOKUP_RESOURCES: &str = "lookup-resources";
    /// Find subjects that can reach a resource.
    pub const LOOKUP_SUBJECTS: &str = "lookup-subjects";
    /// Touch or create one relationship.
    pub const WRITE_RELATIONSHIP: &str = "write-relationship";
    /// Replace the schema.
    pub const WRITE_SCHEMA: &str = "write-schema";
    /// Delete relationships matching a filter.
    pub const DELETE_RELATIONSHIPS: &str = "delete-relationships";
    /// Expand the membership tree of a permission.
    pub const EXPAND_PERMISSION: &str = "expand-permission";

    /// Every name, in registration order.
    pub const ALL: [&str; 9] = [
        READ_SCHEMA,
        READ_RELATIONSHIPS,
        CHECK_PERMISSION,
        LOOKUP_RESOURCES,
        LOOKUP_SUBJECTS,
        WRITE_RELATIONSHIP,
        WRITE_SCHEMA,
        DELETE_RELATIONSHIPS,
        EXPAND_PERMISSION,
    ];
}

/// Result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    /// Human-readable answer, or the error message.
    pub text: String,
    /// Machine-readable payload, when the tool has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured: Option<Value>,
    /// Set when the invocation failed.
    pub is_error: bool,
}

impl ToolOutput {
    /// A successful text-only answer.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            structured: None,
            is_error: false,
        }
    }

    /// A successful answer with a structured payload.
    pub fn with_structured(text: impl Into<String>, structured: Value) -> Self {
        Self {
            text: text.into(),
            structured: Some(structured),
            is_error: false,
        }
    }

    /// A failed invocation.
    pub fn error(error: &Error) -> Self {
        Self {
            text: error.to_string(),
            structured: None,
            is_error: true,
        }
    }
}

/// Dispatches tool calls and resource reads to a [`Client`].
#[derive(Debug, Clone)]
pub struct Tools {
    client: Client,
}

impl Tools {
    /// Wraps a client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns the wrapped client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Invokes the tool `name` with JSON `args`.
    ///
    /// Never fails: errors become an output with `is_error` set.
    pub async fn call(&self, name: &str, args: Value) -> ToolOutput {
        match self.dispatch(name, args).await {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(tool = name, kind = %err.kind(), error = %err, "tool call failed");
                ToolOutput::error(&err)
            }
        }
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<ToolOutput, Error> {
        tracing::debug!(tool = name, "tool call");
        match name {
            names::READ_SCHEMA => {
                let schema = self.client.read_schema().await?;
                Ok(ToolOutput::text(schema))
            }
            names::READ_RELATIONSHIPS => {
                let p: ReadRelationshipsParams = params::parse(args)?;
                let consistency = p.consistency()?;
                let rels = self.client.read_relationships(&p.filter(), consistency).await?;
                let notation: Vec<String> = rels.iter().map(ToString::to_string).collect();
                Ok(ToolOutput::with_structured(
                    format::relationships(&rels),
                    json!({ "relationships": notation }),
                ))
            }
            names::CHECK_PERMISSION => {
                let p: CheckPermissionParams = params::parse(args)?;
                let request = p.request()?;
                let result = self.client.check_permission(&request).await?;
                Ok(ToolOutput::with_structured(
                    format::check(&request, &result, p.explain()),
                    json!({
                        "permissionship": result.permissionship,
                        "allowed": result.permissionship.is_allowed(),
                        "checkedAt": result.checked_at,
                        "missingContext": result.missing_context,
                    }),
                ))
            }
            names::LOOKUP_RESOURCES => {
                let p: LookupResourcesParams = params::parse(args)?;
                let request = p.request()?;
                let results = self.client.lookup_resources(&request).await?;
                Ok(ToolOutput::with_structured(
                    format::lookup_resources(
                        &request.resource_object_type,
                        &request.permission,
                        &results,
                    ),
                    json!({ "resources": results }),
                ))
            }
            names::LOOKUP_SUBJECTS => {
                let p: LookupSubjectsParams = params::parse(args)?;
                let request = p.request()?;
                let results = self.client.lookup_subjects(&request).await?;
                Ok(ToolOutput::with_structured(
                    format::lookup_subjects(
                        &request.subject_object_type,
                        &request.permission,
                        &results,
                    ),
                    json!({ "subjects": results }),
                ))
            }
            names::WRITE_RELATIONSHIP => {
                let p: WriteRelationshipParams = params::parse(args)?;
                let update = p.update()?;
                let token = self
                    .client
                    .write_relationships(std::slice::from_ref(&update))
                    .await?;
                let what = format!(
                    "Relationship {} ({})",
                    update.relationship, update.operation
                );
                Ok(ToolOutput::with_structured(
                    format::written(&what, token.as_ref()),
                    json!({ "writtenAt": token }),
                ))
            }
            names::WRITE_SCHEMA => {
                let p: WriteSchemaParams = params::parse(args)?;
                let token = self.client.write_schema(p.schema()?).await?;
                Ok(ToolOutput::with_structured(
                    format::written("Schema written", token.as_ref()),
                    json!({ "writtenAt": token }),
                ))
            }
            names::DELETE_RELATIONSHIPS => {
                let p: DeleteRelationshipsParams = params::parse(args)?;
                let token = self.client.delete_relationships(&p.filter()?).await?;
                Ok(ToolOutput::with_structured(
                    format::written("Relationships deleted", token.as_ref()),
                    json!({ "deletedAt": token }),
                ))
            }
            names::EXPAND_PERMISSION => {
                let p: ExpandPermissionParams = params::parse(args)?;
                let (resource, permission, consistency) = p.target()?;
                let tree = self
                    .client
                    .expand_permission(&resource, permission, consistency)
                    .await?;
                Ok(ToolOutput::with_structured(
                    format::tree(&tree),
                    serde_json::to_value(&tree)?,
                ))
            }
            other => Err(Error::not_found(format!("unknown tool '{}'", other))),
        }
    }
}
