//! Core types for the bridge.
//!
//! This module provides the values exchanged with the permissions backend:
//!
//! - [`ObjectRef`] / [`SubjectRef`]: resource and subject references
//! - [`Relationship`]: an authorization-graph edge, with its textual notation
//! - [`RelationshipFilter`]: query shape for reads and bulk deletes
//! - [`Consistency`] / [`ZedToken`]: read freshness and snapshot tokens
//! - [`DecisionTrace`]: the recursive record behind a check decision
//! - [`PermissionTree`]: the result of a permission expansion
//!
//! All of them serialize to the backend's camelCase JSON wire shape.

mod check;
mod consistency;
mod expand;
mod filter;
mod lookup;
mod reference;
mod relationship;
mod trace;
mod update;

pub(crate) use check::CheckResponse;
pub use check::{CheckRequest, CheckResult, Permissionship};
pub use consistency::{Consistency, ZedToken};
pub use expand::{PermissionTree, SetOperation, TreeNode};
pub use filter::{RelationFilter, RelationshipFilter, SubjectFilter};
pub use lookup::{
    LookupPermissionship, LookupResourceResult, LookupResourcesRequest, LookupSubjectResult,
    LookupSubjectsRequest,
};
pub use reference::{ObjectRef, SubjectRef};
pub use relationship::Relationship;
pub use trace::{DecisionTrace, PermissionType, SubProblems};
pub use update::{Operation, RelationshipUpdate};
