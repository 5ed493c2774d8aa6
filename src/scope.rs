//! OAuth2 scopes defined by Assignment & Grade Services and the voter
//! functions deciding what a set of granted scopes allows.
//!
//! The voters are plain functions over the granted scope list. Absence of a
//! scope yields `false`; there are no error conditions.

/// Full read/write access to line items.
pub const SCOPE_LINE_ITEM: &str = "https://purl.imsglobal.org/spec/lti-ags/scope/lineitem";

/// Read-only access to line items.
pub const SCOPE_LINE_ITEM_READ_ONLY: &str =
    "https://purl.imsglobal.org/spec/lti-ags/scope/lineitem.readonly";

/// Read-only access to results.
pub const SCOPE_RESULT_READ_ONLY: &str =
    "https://purl.imsglobal.org/spec/lti-ags/scope/result.readonly";

/// Permission to publish scores.
pub const SCOPE_SCORE: &str = "https://purl.imsglobal.org/spec/lti-ags/scope/score";

fn has_scope<S: AsRef<str>>(scopes: &[S], wanted: &str) -> bool {
    scopes.iter().any(|s| s.as_ref() == wanted)
}

/// Line items may be read with either the read-only or the full scope.
pub fn can_read_line_item<S: AsRef<str>>(scopes: &[S]) -> bool {
    has_scope(scopes, SCOPE_LINE_ITEM_READ_ONLY) || has_scope(scopes, SCOPE_LINE_ITEM)
}

pub fn can_write_line_item<S: AsRef<str>>(scopes: &[S]) -> bool {
    has_scope(scopes, SCOPE_LINE_ITEM)
}

pub fn can_write_score<S: AsRef<str>>(scopes: &[S]) -> bool {
    has_scope(scopes, SCOPE_SCORE)
}

pub fn can_read_result<S: AsRef<str>>(scopes: &[S]) -> bool {
    has_scope(scopes, SCOPE_RESULT_READ_ONLY)
}
