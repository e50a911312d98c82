pub mod incident;
pub mod view;

pub use incident::{Incident, ParseEnumError, Severity, ValidatedDraft};
pub use view::{SeverityFilter, SortOrder, ViewState};
