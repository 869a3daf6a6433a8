//! Form validation for vendor drafts.
//!
//! Pure functions: the caller owns the error map and decides how to surface
//! it. Submission must be blocked while the map is non-empty.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

use crate::vendor::{Field, VendorDraft};

lazy_static! {
    // Deliberately permissive: non-whitespace, "@", non-whitespace, ".",
    // non-whitespace. Full address-grammar conformance is the backend's
    // problem.
    static ref EMAIL: Regex = Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid");
}

/// Checks every required field of a draft.
///
/// Returns one message per offending field: `"<Field> is required."` for a
/// blank value, overridden by `"Valid email is required."` when the email is
/// present but malformed. An empty map means the draft may be submitted.
pub fn validate(draft: &VendorDraft) -> BTreeMap<Field, String> {
    let mut errors = BTreeMap::new();
    for field in Field::iter() {
        let value = draft.field(field);
        if value.trim().is_empty() {
            errors.insert(field, format!("{field} is required."));
        } else if field == Field::Email && !EMAIL.is_match(&value) {
            errors.insert(field, String::from("Valid email is required."));
        }
    }
    errors
}

/// True when the email value matches the accepted shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}
