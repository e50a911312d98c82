//! Report-form validation.
//!
//! Validation is all-or-nothing: every rule runs, and any failure returns the
//! complete [`FieldErrors`] set with no draft. Accepted input is carried
//! through unchanged; whitespace is only inspected, never trimmed.

use crate::model::{Severity, ValidatedDraft};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const SEVERITY_REQUIRED: &str = "Severity is required";

/// Fields of the report form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Description,
    Severity,
}

impl FormField {
    pub const ALL: [Self; 3] = [Self::Title, Self::Description, Self::Severity];

    /// Lowercase key used in JSON error output.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Severity => "severity",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-field validation messages, iterated in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("incident form has {} invalid field(s)", .0.len())]
pub struct FieldErrors(BTreeMap<FormField, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: &'static str) {
        self.0.insert(field, message);
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    /// `{"title": "Title is required", ...}`
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .iter()
            .map(|(field, message)| (field.key().to_string(), message.into()))
            .collect();
        serde_json::Value::Object(map)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate raw form input into a draft.
///
/// # Errors
///
/// Returns every failing field when the title or description is blank or the
/// severity is unset.
pub fn validate(
    title: &str,
    description: &str,
    severity: Option<Severity>,
) -> Result<ValidatedDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    if is_blank(title) {
        errors.insert(FormField::Title, TITLE_REQUIRED);
    }
    if is_blank(description) {
        errors.insert(FormField::Description, DESCRIPTION_REQUIRED);
    }

    match severity {
        Some(severity) if errors.is_empty() => Ok(ValidatedDraft {
            title: title.to_string(),
            description: description.to_string(),
            severity,
        }),
        Some(_) => Err(errors),
        None => {
            errors.insert(FormField::Severity, SEVERITY_REQUIRED);
            Err(errors)
        }
    }
}

/// Like [`validate`], with severity given as text.
///
/// Empty or unrecognised severity text is treated as unset.
///
/// # Errors
///
/// Same as [`validate`].
pub fn validate_raw(
    title: &str,
    description: &str,
    severity: &str,
) -> Result<ValidatedDraft, FieldErrors> {
    validate(title, description, severity.parse::<Severity>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_input_is_carried_through_unchanged() {
        let draft = validate("  Test ", "Desc\nmore", Some(Severity::High)).unwrap();
        assert_eq!(draft.title(), "  Test ");
        assert_eq!(draft.description(), "Desc\nmore");
        assert_eq!(draft.severity(), Severity::High);
    }

    #[test]
    fn empty_title_yields_only_title_error() {
        let errors = validate("", "Desc", Some(Severity::Low)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Title), Some(TITLE_REQUIRED));
        assert_eq!(errors.get(FormField::Description), None);
    }

    #[test]
    fn whitespace_only_fields_are_blank() {
        let errors = validate(" \t", "\n  ", Some(Severity::Medium)).unwrap_err();
        assert_eq!(errors.get(FormField::Title), Some(TITLE_REQUIRED));
        assert_eq!(errors.get(FormField::Description), Some(DESCRIPTION_REQUIRED));
    }

    #[test]
    fn all_errors_reported_together_in_form_order() {
        let errors = validate("", "", None).unwrap_err();
        let fields: Vec<FormField> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, FormField::ALL.to_vec());
        assert_eq!(errors.to_string(), "incident form has 3 invalid field(s)");
    }

    #[test]
    fn missing_severity_alone_fails() {
        let errors = validate("Test", "Desc", None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Severity), Some(SEVERITY_REQUIRED));
    }

    #[test]
    fn raw_severity_text_is_parsed() {
        assert_eq!(
            validate_raw("T", "D", "medium").unwrap().severity(),
            Severity::Medium
        );
        let errors = validate_raw("T", "D", "").unwrap_err();
        assert_eq!(errors.get(FormField::Severity), Some(SEVERITY_REQUIRED));
        let errors = validate_raw("T", "D", "critical").unwrap_err();
        assert_eq!(errors.get(FormField::Severity), Some(SEVERITY_REQUIRED));
    }

    #[test]
    fn errors_render_as_json_object() {
        let errors = validate("", "Desc", Some(Severity::Low)).unwrap_err();
        assert_eq!(
            errors.to_json(),
            serde_json::json!({ "title": "Title is required" })
        );
    }
}
