//! Report form state: raw input plus inline field errors.

use crate::model::{Incident, Severity};
use crate::store::IncidentStore;
use crate::validate::{self, FieldErrors, FormField};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentForm {
    pub title: String,
    pub description: String,
    /// `None` until the user picks a level.
    pub severity: Option<Severity>,
    errors: FieldErrors,
}

impl IncidentForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and, only on success, hand the draft to `store`.
    ///
    /// A rejected submission leaves the store untouched and records the full
    /// error set for inline display. An accepted one clears the errors; the
    /// store closes the form as part of `add_incident`.
    pub fn submit(&mut self, store: &mut IncidentStore) -> Option<Incident> {
        match validate::validate(&self.title, &self.description, self.severity) {
            Ok(draft) => {
                self.errors.clear();
                Some(store.add_incident(draft))
            }
            Err(errors) => {
                debug!(invalid = errors.len(), "report form rejected");
                self.errors = errors;
                None
            }
        }
    }

    /// Close the form without validating.
    pub fn cancel(&mut self, store: &mut IncidentStore) {
        store.close_form();
    }

    /// Clear input and errors.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(field)
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::TITLE_REQUIRED;

    #[test]
    fn empty_title_is_rejected_without_creating() {
        let mut store = IncidentStore::new();
        store.toggle_form();
        let mut form = IncidentForm {
            description: "Desc".into(),
            severity: Some(Severity::High),
            ..IncidentForm::default()
        };

        assert!(form.submit(&mut store).is_none());
        assert!(store.is_empty());
        assert!(store.is_form_open());
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.error(FormField::Title), Some(TITLE_REQUIRED));
    }

    #[test]
    fn valid_submission_creates_incident_and_closes_form() {
        let mut store = IncidentStore::new();
        store.toggle_form();
        let mut form = IncidentForm {
            title: "Test".into(),
            description: "Desc".into(),
            severity: Some(Severity::High),
            ..IncidentForm::default()
        };

        let created = form.submit(&mut store).unwrap();
        assert_eq!(created.title(), "Test");
        assert_eq!(created.description(), "Desc");
        assert_eq!(created.severity(), Severity::High);
        assert_eq!(store.len(), 1);
        assert!(!store.is_form_open());
    }

    #[test]
    fn successful_resubmit_clears_previous_errors() {
        let mut store = IncidentStore::new();
        let mut form = IncidentForm::new();
        assert!(form.submit(&mut store).is_none());
        assert_eq!(form.errors().len(), 3);

        form.title = "Fixed".into();
        form.description = "Now complete".into();
        form.severity = Some(Severity::Low);
        assert!(form.submit(&mut store).is_some());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn cancel_closes_form_without_validating() {
        let mut store = IncidentStore::new();
        store.toggle_form();
        let mut form = IncidentForm::new();
        form.cancel(&mut store);
        assert!(!store.is_form_open());
        assert!(form.errors().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn reset_clears_input_and_errors() {
        let mut store = IncidentStore::new();
        let mut form = IncidentForm {
            title: "draft".into(),
            ..IncidentForm::default()
        };
        let _ = form.submit(&mut store);
        form.reset();
        assert_eq!(form, IncidentForm::default());
    }
}
