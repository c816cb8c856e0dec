//! Human-readable rendering of decision traces and permission trees.
//!
//! Both renderers are pure and recursive: one line per node, two spaces of
//! indentation per level, children in the order the backend produced them.
//! Recursion stops at [`MAX_RENDER_DEPTH`] with a single truncation line, so
//! a pathologically deep tree from the backend cannot exhaust the stack.
//!
//! ```text
//! permission view on document:readme for user:alice: HAS_PERMISSION
//! Duration: 0.000214s
//! This was determined by:
//!   relation viewer on document:readme for user:alice: HAS_PERMISSION
//! ```

use crate::types::{DecisionTrace, PermissionTree, TreeNode};

/// Deepest level either renderer descends to.
pub const MAX_RENDER_DEPTH: usize = 64;

/// Line rendered when a check returned no trace.
pub const NO_TRACE: &str = "No trace data available.";

const DETERMINED_BY: &str = "This was determined by:";

/// Renders a decision trace starting at indentation level `depth`.
///
/// ```rust
/// use spicebridge::explain::{render_trace, NO_TRACE};
///
/// assert_eq!(render_trace(None, 0).trim_end(), NO_TRACE);
/// ```
pub fn render_trace(trace: Option<&DecisionTrace>, depth: usize) -> String {
    let mut out = String::new();
    match trace {
        Some(trace) => write_trace(&mut out, trace, depth),
        None => push_line(&mut out, depth, NO_TRACE),
    }
    out
}

fn write_trace(out: &mut String, node: &DecisionTrace, depth: usize) {
    if depth >= MAX_RENDER_DEPTH {
        push_truncated(out, depth);
        return;
    }

    push_line(
        out,
        depth,
        &format!(
            "{} {} on {} for {}: {}",
            node.permission_type.label(),
            node.permission,
            node.resource,
            node.subject,
            node.outcome()
        ),
    );

    if let Some(duration) = node.duration.as_deref().filter(|d| !d.is_empty()) {
        push_line(out, depth, &format!("Duration: {}", duration));
    }

    let children = node.children();
    if children.is_empty() {
        return;
    }

    push_line(out, depth, DETERMINED_BY);
    for child in children {
        write_trace(out, child, depth + 1);
    }
}

/// Renders an expanded permission tree starting at indentation level `depth`.
///
/// Intermediate nodes print their set operation; leaves list their subjects.
pub fn render_tree(tree: &PermissionTree, depth: usize) -> String {
    let mut out = String::new();
    write_tree(&mut out, tree, depth);
    out
}

fn write_tree(out: &mut String, tree: &PermissionTree, depth: usize) {
    if depth >= MAX_RENDER_DEPTH {
        push_truncated(out, depth);
        return;
    }

    let head = format!("{}#{}", tree.expanded_object, tree.expanded_relation);
    match tree.node {
        TreeNode::Intermediate {
            operation,
            ref children,
        } => {
            push_line(out, depth, &format!("{} ({})", head, operation));
            for child in children {
                write_tree(out, child, depth + 1);
            }
        }
        TreeNode::Leaf { ref subjects } if subjects.is_empty() => {
            push_line(out, depth, &format!("{}: (no subjects)", head));
        }
        TreeNode::Leaf { ref subjects } => {
            let subjects: Vec<String> = subjects.iter().map(ToString::to_string).collect();
            push_line(out, depth, &format!("{}: {}", head, subjects.join(", ")));
        }
    }
}

fn push_truncated(out: &mut String, depth: usize) {
    push_line(
        out,
        depth,
        &format!("... (truncated at depth {})", MAX_RENDER_DEPTH),
    );
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}
