//! Navigable resources: the schema, filtered relationship listings and
//! individual schema definitions.

use serde::Serialize;

use super::Tools;
use crate::error::Error;
use crate::schema::{extract_definitions, find_definition};
use crate::types::{Consistency, RelationshipFilter};

/// URI of the current schema.
pub const SCHEMA_URI: &str = "schema://current";

const RELATIONSHIPS_SCHEME: &str = "relationships://";
const DEFINITION_SCHEME: &str = "definition://";
const MAX_FILTER_SEGMENTS: usize = 6;

/// A resource advertised to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    /// Address passed back to [`Tools::read_resource`].
    pub uri: String,
    /// Short display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Content type of the resource text.
    pub mime_type: &'static str,
}

/// The text behind a resource URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    /// The URI that was read.
    pub uri: String,
    /// Content type of `text`.
    pub mime_type: &'static str,
    /// The resource body.
    pub text: String,
}

#[derive(Debug, PartialEq, Eq)]
enum ResourceUri {
    Schema,
    Relationships(RelationshipFilter),
    Definition(String),
}

impl ResourceUri {
    fn parse(uri: &str) -> Result<Self, Error> {
        if uri == SCHEMA_URI {
            return Ok(ResourceUri::Schema);
        }

        if let Some(rest) = uri.strip_prefix(RELATIONSHIPS_SCHEME) {
            let segments = if rest.is_empty() {
                Vec::new()
            } else {
                rest.split('/').map(decode).collect::<Result<Vec<_>, _>>()?
            };
            if segments.len() > MAX_FILTER_SEGMENTS {
                return Err(Error::validation(format!(
                    "relationships URI takes at most {} segments, got {}",
                    MAX_FILTER_SEGMENTS,
                    segments.len()
                )));
            }
            let segment = |i: usize| {
                segments
                    .get(i)
                    .map(String::as_str)
                    .filter(|s| !s.is_empty() && *s != "*")
            };
            return Ok(ResourceUri::Relationships(RelationshipFilter::build(
                segment(0),
                segment(1),
                segment(2),
                segment(3),
                segment(4),
                segment(5),
            )));
        }

        if let Some(rest) = uri.strip_prefix(DEFINITION_SCHEME) {
            let object_type = decode(rest)?;
            if object_type.is_empty() {
                return Err(Error::missing_field("objectType"));
            }
            return Ok(ResourceUri::Definition(object_type));
        }

        Err(Error::not_found(format!("unknown resource '{}'", uri)))
    }
}

fn decode(segment: &str) -> Result<String, Error> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|err| Error::validation(format!("invalid URI segment '{}': {}", segment, err)))
}

fn definition_uri(object_type: &str) -> String {
    format!("{}{}", DEFINITION_SCHEME, urlencoding::encode(object_type))
}

impl Tools {
    /// Lists the schema, the unfiltered relationship listing, and one
    /// resource per schema definition.
    pub async fn list_resources(&self) -> Result<Vec<ResourceInfo>, Error> {
        let schema = self.client().read_schema().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to read schema for resource listing");
        })?;

        let mut resources = vec![
            ResourceInfo {
                uri: SCHEMA_URI.to_string(),
                name: "Schema".to_string(),
                description: "The current permissions schema".to_string(),
                mime_type: "text/plain",
            },
            ResourceInfo {
                uri: RELATIONSHIPS_SCHEME.to_string(),
                name: "Relationships".to_string(),
                description: "All relationships; append up to six filter segments".to_string(),
                mime_type: "text/plain",
            },
        ];
        resources.extend(extract_definitions(&schema).into_iter().map(|block| ResourceInfo {
            uri: definition_uri(&block.object_type),
            description: format!("Schema definition of '{}'", block.object_type),
            name: block.object_type,
            mime_type: "text/plain",
        }));
        Ok(resources)
    }

    /// Reads a resource by URI.
    ///
    /// Unknown schemes and unknown definitions fail with
    /// [`ErrorKind::NotFound`](crate::ErrorKind::NotFound).
    pub async fn read_resource(&self, uri: &str) -> Result<ResourceContent, Error> {
        let text = self.resource_text(uri).await.inspect_err(|err| {
            tracing::warn!(uri = %uri, error = %err, "resource read failed");
        })?;
        Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "text/plain",
            text,
        })
    }

    async fn resource_text(&self, uri: &str) -> Result<String, Error> {
        match ResourceUri::parse(uri)? {
            ResourceUri::Schema => self.client().read_schema().await,
            ResourceUri::Relationships(filter) => {
                let relationships = self
                    .client()
                    .read_relationships(&filter, Consistency::default())
                    .await?;
                Ok(relationships
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            ResourceUri::Definition(object_type) => {
                let schema = self.client().read_schema().await?;
                Ok(find_definition(&schema, &object_type)?.raw_text)
            }
        }
    }
}
