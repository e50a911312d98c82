//! In-memory incident store and its derived view.
//!
//! The store owns every [`Incident`] in insertion order together with the
//! [`ViewState`] the dashboard renders from. All transitions are synchronous
//! and driven by one UI event at a time.

use crate::model::{Incident, SeverityFilter, SortOrder, ValidatedDraft, ViewState};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Rejected seed sets. Runtime submissions cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("duplicate incident id {0} in seed set")]
    DuplicateId(u64),
    #[error("incident ids must be positive")]
    ZeroId,
    #[error("incident id {0} leaves no room for new ids")]
    IdOutOfRange(u64),
    #[error("incident {id} has an empty {field}")]
    EmptyField { id: u64, field: &'static str },
}

#[derive(Debug, Clone, Default)]
pub struct IncidentStore {
    incidents: Vec<Incident>,
    view: ViewState,
}

impl IncidentStore {
    /// An empty store with the default view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an existing record set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when an id is zero, `u64::MAX`, or repeated,
    /// or when a record's title or description is blank.
    pub fn with_incidents(incidents: Vec<Incident>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(incidents.len());
        for incident in &incidents {
            if incident.id() == 0 {
                return Err(StoreError::ZeroId);
            }
            if incident.id() == u64::MAX {
                return Err(StoreError::IdOutOfRange(incident.id()));
            }
            if !seen.insert(incident.id()) {
                return Err(StoreError::DuplicateId(incident.id()));
            }
            if incident.title().trim().is_empty() {
                return Err(StoreError::EmptyField {
                    id: incident.id(),
                    field: "title",
                });
            }
            if incident.description().trim().is_empty() {
                return Err(StoreError::EmptyField {
                    id: incident.id(),
                    field: "description",
                });
            }
        }
        debug!(count = incidents.len(), "seeded incident store");
        Ok(Self {
            incidents,
            view: ViewState::default(),
        })
    }

    /// A store holding the three built-in sample incidents.
    #[must_use]
    pub fn with_sample_data() -> Self {
        Self {
            incidents: crate::seed::sample_incidents(),
            view: ViewState::default(),
        }
    }

    /// All incidents in insertion order.
    #[must_use]
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Incident> {
        self.incidents.iter().find(|incident| incident.id() == id)
    }

    /// The id the next [`add_incident`](Self::add_incident) will assign.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.incidents
            .iter()
            .map(Incident::id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    // -----------------------------------------------------------------------
    // Derived view
    // -----------------------------------------------------------------------

    /// Incidents passing `filter`, ordered by `reported_at`.
    ///
    /// `Vec::sort_by` is stable, so incidents reported at the same instant
    /// keep their insertion order under either direction.
    #[must_use]
    pub fn list_view(&self, filter: SeverityFilter, sort: SortOrder) -> Vec<&Incident> {
        let mut view: Vec<&Incident> = self
            .incidents
            .iter()
            .filter(|incident| filter.matches(incident.severity()))
            .collect();
        view.sort_by(|a, b| match sort {
            SortOrder::Newest => b.reported_at().cmp(&a.reported_at()),
            SortOrder::Oldest => a.reported_at().cmp(&b.reported_at()),
        });
        view
    }

    /// [`list_view`](Self::list_view) under the store's own filter and sort.
    #[must_use]
    pub fn visible(&self) -> Vec<&Incident> {
        self.list_view(self.view.filter, self.view.sort)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a validated draft stamped with the current time.
    pub fn add_incident(&mut self, draft: ValidatedDraft) -> Incident {
        self.add_incident_at(draft, Utc::now())
    }

    /// Append a validated draft stamped with `now`. Closes the form.
    pub fn add_incident_at(&mut self, draft: ValidatedDraft, now: DateTime<Utc>) -> Incident {
        let id = self.next_id();
        let incident = Incident::new(id, draft.title, draft.description, draft.severity, now);
        self.incidents.push(incident.clone());
        self.view.form_open = false;
        info!(id, severity = %incident.severity(), "incident reported");
        incident
    }

    /// Expand `id`, or collapse it if it is already the expanded incident.
    pub fn toggle_expanded(&mut self, id: u64) {
        self.view.expanded = if self.view.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
        debug!(expanded = ?self.view.expanded, "toggled incident details");
    }

    #[must_use]
    pub const fn expanded(&self) -> Option<u64> {
        self.view.expanded
    }

    #[must_use]
    pub fn is_expanded(&self, id: u64) -> bool {
        self.view.expanded == Some(id)
    }

    pub fn set_filter(&mut self, filter: SeverityFilter) {
        debug!(%filter, "severity filter changed");
        self.view.filter = filter;
    }

    #[must_use]
    pub const fn filter(&self) -> SeverityFilter {
        self.view.filter
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        debug!(%sort, "sort order changed");
        self.view.sort = sort;
    }

    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.view.sort
    }

    /// The "Report New Incident" action.
    pub fn toggle_form(&mut self) {
        self.view.form_open = !self.view.form_open;
        debug!(open = self.view.form_open, "report form toggled");
    }

    pub fn close_form(&mut self) {
        self.view.form_open = false;
    }

    #[must_use]
    pub const fn is_form_open(&self) -> bool {
        self.view.form_open
    }

    #[must_use]
    pub const fn view(&self) -> ViewState {
        self.view
    }
}
