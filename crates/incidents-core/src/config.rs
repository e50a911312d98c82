use crate::model::{SeverityFilter, SortOrder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Initial view state for a new dashboard session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default)]
    pub severity: SeverityFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Start from the built-in sample incidents when no seed file is given.
    #[serde(default = "default_true")]
    pub sample_data: bool,
    /// JSON seed file, relative to the project root.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            sample_data: default_true(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub resolved_output: String,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".incidents/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("incidents/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_json,
        user.output,
        env_format,
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        resolved_output,
    })
}

/// Normalize an output-mode name; `None` for unknown values.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<String>,
    env_format: Option<String>,
    is_tty: bool,
) -> String {
    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if is_tty {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    fn write_project_config(root: &Path, content: &str) {
        let dir = root.join(".incidents");
        std::fs::create_dir_all(&dir).expect("create .incidents");
        std::fs::write(dir.join("config.toml"), content).expect("write config");
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.view.sort, SortOrder::Newest);
        assert_eq!(cfg.view.severity, SeverityFilter::All);
        assert!(cfg.seed.sample_data);
        assert!(cfg.seed.path.is_none());
    }

    #[test]
    fn project_config_sets_initial_view_and_seed() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(
            root.path(),
            r#"
[view]
sort = "oldest"
severity = "High"

[seed]
sample_data = false
path = "incidents.json"
"#,
        );

        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.view.sort, SortOrder::Oldest);
        assert_eq!(cfg.view.severity, SeverityFilter::Only(Severity::High));
        assert!(!cfg.seed.sample_data);
        assert_eq!(cfg.seed.path, Some(PathBuf::from("incidents.json")));
    }

    #[test]
    fn invalid_project_config_reports_path() {
        let root = tempfile::tempdir().expect("tempdir");
        write_project_config(root.path(), "[view]\nseverity = \"catastrophic\"\n");

        let err = load_project_config(root.path()).expect_err("parse should fail");
        assert!(format!("{err}").contains("config.toml"));
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        let output = resolve_output(
            true,
            Some("pretty".to_string()),
            Some("text".to_string()),
            true,
        );
        assert_eq!(output, "json");
    }

    #[test]
    fn env_beats_user_config() {
        let output = resolve_output(false, Some("json".to_string()), Some("text".to_string()), true);
        assert_eq!(output, "text");
    }

    #[test]
    fn legacy_aliases_are_normalized() {
        assert_eq!(
            resolve_output(false, Some("table".to_string()), Some("human".to_string()), false),
            "pretty"
        );
        assert_eq!(normalize_output_mode("TABLE"), Some("text"));
        assert_eq!(normalize_output_mode("yaml"), None);
    }

    #[test]
    fn tty_detection_is_the_fallback() {
        assert_eq!(resolve_output(false, None, None, true), "pretty");
        assert_eq!(resolve_output(false, None, Some("bogus".into()), false), "text");
    }

    #[test]
    fn user_config_parses_output() {
        let cfg: UserConfig = toml::from_str("output = \"json\"\n").expect("parse");
        assert_eq!(cfg.output.as_deref(), Some("json"));
    }
}
