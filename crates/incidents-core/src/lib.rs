//! incidents-core library.
//!
//! In-memory incident store, derived list view, and report-form validation
//! for the incidents dashboard.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` types for domain failures; `anyhow::Result` at
//!   I/O boundaries (config, seed files).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod seed;
pub mod store;
pub mod validate;

pub use form::IncidentForm;
pub use model::{Incident, Severity, SeverityFilter, SortOrder, ValidatedDraft, ViewState};
pub use store::{IncidentStore, StoreError};
pub use validate::{FieldErrors, FormField};
