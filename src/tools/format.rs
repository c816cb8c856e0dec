//! Text rendering of tool results.

use std::fmt::Write as _;

use crate::explain::{render_trace, render_tree};
use crate::types::{
    CheckRequest, CheckResult, LookupPermissionship, LookupResourceResult, LookupSubjectResult,
    PermissionTree, Permissionship, Relationship, ZedToken,
};

pub(crate) fn relationships(relationships: &[Relationship]) -> String {
    if relationships.is_empty() {
        return "No relationships found.".to_string();
    }
    let mut out = format!("Found {} relationship(s):", relationships.len());
    for rel in relationships {
        let _ = write!(out, "\n{}", rel);
    }
    out
}

pub(crate) fn check(request: &CheckRequest, result: &CheckResult, explain: bool) -> String {
    let mut out = format!(
        "{}#{}@{}: {}",
        request.resource, request.permission, request.subject, result.permissionship
    );
    if let Some(ref token) = result.checked_at {
        let _ = write!(out, "\nChecked at: {}", token);
    }
    if result.permissionship == Permissionship::ConditionalPermission
        && !result.missing_context.is_empty()
    {
        let _ = write!(
            out,
            "\nMissing caveat context: {}",
            result.missing_context.join(", ")
        );
    }
    if explain {
        let _ = write!(
            out,
            "\n\nExplanation:\n{}",
            render_trace(result.trace.as_ref(), 0).trim_end()
        );
    }
    out
}

pub(crate) fn lookup_resources(
    resource_type: &str,
    permission: &str,
    results: &[LookupResourceResult],
) -> String {
    if results.is_empty() {
        return format!("No {} resources with permission '{}'.", resource_type, permission);
    }
    let mut out = format!(
        "Found {} {} resource(s) with permission '{}':",
        results.len(),
        resource_type,
        permission
    );
    for result in results {
        let _ = write!(
            out,
            "\n- {}:{}{}",
            resource_type,
            result.resource_object_id,
            conditional(result.permissionship)
        );
    }
    out
}

pub(crate) fn lookup_subjects(
    subject_type: &str,
    permission: &str,
    results: &[LookupSubjectResult],
) -> String {
    if results.is_empty() {
        return format!("No {} subjects with permission '{}'.", subject_type, permission);
    }
    let mut out = format!(
        "Found {} {} subject(s) with permission '{}':",
        results.len(),
        subject_type,
        permission
    );
    for result in results {
        let _ = write!(
            out,
            "\n- {}:{}{}",
            subject_type,
            result.subject_object_id,
            conditional(result.permissionship)
        );
    }
    out
}

pub(crate) fn written(what: &str, token: Option<&ZedToken>) -> String {
    match token {
        Some(token) => format!("{} (revision {}).", what, token),
        None => format!("{}.", what),
    }
}

pub(crate) fn tree(tree: &PermissionTree) -> String {
    render_tree(tree, 0).trim_end().to_string()
}

fn conditional(permissionship: LookupPermissionship) -> &'static str {
    match permissionship {
        LookupPermissionship::ConditionalPermission => " (conditional)",
        _ => "",
    }
}
