//! Builds the in-memory store a CLI invocation or dashboard session works on.

use anyhow::{Context, Result};
use incidents_core::config::ProjectConfig;
use incidents_core::seed;
use incidents_core::{Incident, IncidentStore};
use std::path::Path;
use tracing::debug;

/// Resolve the seed set and initial view for a session.
///
/// Seed precedence: `--seed` flag, then `[seed] path` from the project
/// config (relative to `project_root`), then the built-in sample incidents
/// unless `[seed] sample_data = false`.
pub fn open_store(
    project_root: &Path,
    config: &ProjectConfig,
    seed_flag: Option<&Path>,
) -> Result<IncidentStore> {
    let seed_path = seed_flag
        .map(Path::to_path_buf)
        .or_else(|| config.seed.path.as_ref().map(|p| project_root.join(p)));

    let incidents: Vec<Incident> = match seed_path {
        Some(path) => seed::load_seed_file(&path)?,
        None if config.seed.sample_data => seed::sample_incidents(),
        None => Vec::new(),
    };

    let mut store =
        IncidentStore::with_incidents(incidents).context("Seed set contains invalid incidents")?;
    store.set_filter(config.view.severity);
    store.set_sort(config.view.sort);
    debug!(incidents = store.len(), "session store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use incidents_core::{Severity, SeverityFilter, SortOrder};

    #[test]
    fn default_config_uses_sample_data() {
        let root = tempfile::tempdir().unwrap();
        let store = open_store(root.path(), &ProjectConfig::default(), None).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.filter(), SeverityFilter::All);
        assert_eq!(store.sort(), SortOrder::Newest);
    }

    #[test]
    fn sample_data_can_be_disabled() {
        let root = tempfile::tempdir().unwrap();
        let mut config = ProjectConfig::default();
        config.seed.sample_data = false;
        let store = open_store(root.path(), &config, None).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn config_view_is_applied() {
        let root = tempfile::tempdir().unwrap();
        let mut config = ProjectConfig::default();
        config.view.severity = SeverityFilter::Only(Severity::High);
        config.view.sort = SortOrder::Oldest;
        let store = open_store(root.path(), &config, None).unwrap();
        assert_eq!(store.visible().len(), 1);
        assert_eq!(store.sort(), SortOrder::Oldest);
    }

    #[test]
    fn config_seed_path_is_relative_to_root() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("seed.json"), "[]").unwrap();
        let mut config = ProjectConfig::default();
        config.seed.path = Some("seed.json".into());
        let store = open_store(root.path(), &config, None).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("dupes.json");
        std::fs::write(
            &path,
            r#"[
  {"id": 1, "title": "a", "description": "a", "severity": "Low", "reported_at": "2025-01-01T00:00:00Z"},
  {"id": 1, "title": "b", "description": "b", "severity": "Low", "reported_at": "2025-01-02T00:00:00Z"}
]"#,
        )
        .unwrap();
        let err = open_store(root.path(), &ProjectConfig::default(), Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate incident id 1"));
    }
}
