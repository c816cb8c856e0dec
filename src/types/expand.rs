//! Permission expansion trees.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ObjectRef, SubjectRef};

/// The expanded membership of a permission or relation on one object.
///
/// Deserialized from the gateway's `treeRoot` shape, where a node carries
/// either an `intermediate` set operation or a `leaf` subject list. A node
/// with neither is read as an empty leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TreeWire")]
pub struct PermissionTree {
    /// Object the node was expanded on.
    pub expanded_object: ObjectRef,
    /// Permission or relation expanded.
    pub expanded_relation: String,
    /// Contents of the node.
    pub node: TreeNode,
}

/// Contents of a [`PermissionTree`] node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TreeNode {
    /// A set operation over child trees.
    Intermediate {
        /// How the children combine.
        operation: SetOperation,
        /// Child trees in backend order.
        children: Vec<PermissionTree>,
    },
    /// Subjects directly related.
    Leaf {
        /// The subjects.
        subjects: Vec<SubjectRef>,
    },
}

/// Set operation of an intermediate node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOperation {
    /// Members of any child.
    #[serde(rename = "OPERATION_UNION")]
    Union,
    /// Members of every child.
    #[serde(rename = "OPERATION_INTERSECTION")]
    Intersection,
    /// Members of the first child not in the others.
    #[serde(rename = "OPERATION_EXCLUSION")]
    Exclusion,
    /// Not reported.
    #[default]
    #[serde(other, rename = "OPERATION_UNSPECIFIED")]
    Unspecified,
}

impl fmt::Display for SetOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SetOperation::Union => "union",
            SetOperation::Intersection => "intersection",
            SetOperation::Exclusion => "exclusion",
            SetOperation::Unspecified => "unspecified",
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeWire {
    #[serde(default)]
    expanded_object: ObjectRef,
    #[serde(default)]
    expanded_relation: String,
    #[serde(default)]
    intermediate: Option<IntermediateWire>,
    #[serde(default)]
    leaf: Option<LeafWire>,
}

#[derive(Deserialize)]
struct IntermediateWire {
    #[serde(default)]
    operation: SetOperation,
    #[serde(default)]
    children: Vec<PermissionTree>,
}

#[derive(Deserialize)]
struct LeafWire {
    #[serde(default)]
    subjects: Vec<SubjectRef>,
}

impl From<TreeWire> for PermissionTree {
    fn from(wire: TreeWire) -> Self {
        let node = match (wire.intermediate, wire.leaf) {
            (Some(intermediate), _) => TreeNode::Intermediate {
                operation: intermediate.operation,
                children: intermediate.children,
            },
            (None, Some(leaf)) => TreeNode::Leaf {
                subjects: leaf.subjects,
            },
            (None, None) => TreeNode::Leaf {
                subjects: Vec::new(),
            },
        };
        Self {
            expanded_object: wire.expanded_object,
            expanded_relation: wire.expanded_relation,
            node,
        }
    }
}
