//! Extraction of `definition` blocks from schema source text.
//!
//! Blocks are found by a line scan with a single brace counter, not by a
//! real parser. Braces inside string literals, comments or caveat
//! expressions are counted like any other brace and will shift block
//! boundaries; such schemas are not supported here.

use std::sync::LazyLock;

use regex::Regex;

use crate::Error;

#[allow(clippy::expect_used)]
static DEFINITION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*definition\s+([A-Za-z_][\w/]*)\s*\{").expect("valid definition regex")
});

/// One `definition` block sliced out of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinitionBlock {
    /// The defined object type, e.g. `document` or `tenant/document`.
    pub object_type: String,
    /// The block text, from the `definition` line to its closing brace.
    pub raw_text: String,
}

/// Returns every complete definition block, in schema order.
///
/// A block starts on a line matching `definition <identifier> {` (only
/// outside another block) and ends on the line where the brace balance
/// returns to zero. A block still open at end of input is dropped.
///
/// ```rust
/// use spicebridge::schema::extract_definitions;
///
/// let blocks = extract_definitions("definition user {}\ndefinition doc {\n  relation viewer: user\n}");
/// let names: Vec<_> = blocks.iter().map(|b| b.object_type.as_str()).collect();
/// assert_eq!(names, ["user", "doc"]);
/// ```
pub fn extract_definitions(schema: &str) -> Vec<SchemaDefinitionBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<(String, Vec<&str>, i64)> = None;

    for line in schema.lines() {
        let (object_type, lines, balance) = match open.take() {
            Some((object_type, mut lines, balance)) => {
                lines.push(line);
                (object_type, lines, balance + brace_delta(line))
            }
            None => match DEFINITION_START.captures(line) {
                Some(caps) => (caps[1].to_string(), vec![line], brace_delta(line)),
                None => continue,
            },
        };

        if balance <= 0 {
            blocks.push(SchemaDefinitionBlock {
                object_type,
                raw_text: lines.join("\n"),
            });
        } else {
            open = Some((object_type, lines, balance));
        }
    }

    if let Some((object_type, _, _)) = open {
        tracing::debug!(object_type = %object_type, "dropping unterminated definition");
    }

    blocks
}

/// Returns the block defining `object_type`.
///
/// Fails with [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) when the
/// schema has no complete block of that name.
pub fn find_definition(schema: &str, object_type: &str) -> Result<SchemaDefinitionBlock, Error> {
    extract_definitions(schema)
        .into_iter()
        .find(|block| block.object_type == object_type)
        .ok_or_else(|| {
            Error::not_found(format!(
                "definition '{}' not found in schema",
                object_type
            ))
        })
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}
