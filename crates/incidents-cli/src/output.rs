//! Shared output layer for pretty/text/JSON parity across CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for pipes and agents,
//! or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` flag
//! 2. hidden `--json` flag
//! 3. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 4. `output` in the user config file
//! 5. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! Steps 2–5 live in `incidents_core::config::resolve_config`.

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use incidents_core::error::ErrorCode;
use incidents_core::{FieldErrors, Incident};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// Shown wherever a filtered incident list comes back empty.
pub const EMPTY_LIST_MESSAGE: &str = "No incidents found matching the current filters.";

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// Report time as shown on incident cards, e.g. `Mar 15, 2025 at 10:00 AM`.
#[must_use]
pub fn format_reported(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%b %-d, %Y at %-I:%M %p")
        .to_string()
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Token-efficient plain text for agents and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Map a normalized mode name (`pretty|text|json`) to a mode.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            "text" => Self::Text,
            _ => Self::Pretty,
        }
    }
}

/// Trait implemented by any CLI result type that can be rendered in all modes.
pub trait Renderable {
    /// Render for human consumption.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a self-contained JSON value (no trailing newline required).
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a single text row, columns in [`table_headers`] order.
    ///
    /// [`table_headers`]: Renderable::table_headers
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Column headers for text mode.
    fn table_headers() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }
}

impl Renderable for Incident {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "#{:<4} {}", self.id(), self.title())?;
        writeln!(
            w,
            "      [{}]  Reported: {}",
            self.severity(),
            format_reported(self.reported_at())
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.id(),
            self.severity(),
            self.reported_at().to_rfc3339(),
            self.title()
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "severity", "reported_at", "title"]
    }
}

/// Write one [`Renderable`] item in the given mode.
pub fn write_item<R: Renderable>(w: &mut dyn Write, item: &R, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => item.render_human(w),
        OutputMode::Text => item.render_table(w),
        OutputMode::Json => {
            item.render_json(w)?;
            writeln!(w)
        }
    }
}

/// Write a list of [`Renderable`] items.
///
/// - JSON mode wraps items in an array (`[]` when empty).
/// - Text mode prints a header row followed by one row per item.
/// - Pretty mode prints items separated by blank lines, or `empty_message`.
pub fn write_list<R: Renderable>(
    w: &mut dyn Write,
    items: &[&R],
    mode: OutputMode,
    empty_message: &str,
) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => {
            if items.is_empty() {
                return writeln!(w, "{empty_message}");
            }
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    writeln!(w)?;
                }
                item.render_human(w)?;
            }
        }
        OutputMode::Text => {
            if !items.is_empty() {
                writeln!(w, "{}", R::table_headers().join("  "))?;
            }
            for item in items {
                item.render_table(w)?;
            }
        }
        OutputMode::Json => {
            write!(w, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(w, ",")?;
                }
                writeln!(w)?;
                item.render_json(w)?;
            }
            writeln!(w, "\n]")?;
        }
    }
    Ok(())
}

/// Render a list to stdout.
pub fn render_list<R: Renderable>(
    items: &[&R],
    mode: OutputMode,
    empty_message: &str,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_list(&mut out, items, mode, empty_message)
}

/// A structured error with optional suggestion, error code, and field errors.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "validation_failed").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Per-field messages for form validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<serde_json::Value>,
}

impl CliError {
    /// Create an error from a classified [`ErrorCode`].
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.key().to_string()),
            fields: None,
        }
    }

    /// A validation failure carrying each field's message.
    pub fn from_field_errors(errors: &FieldErrors) -> Self {
        let mut err = Self::from_code(ErrorCode::ValidationFailed, errors.to_string());
        err.fields = Some(errors.to_json());
        err
    }
}

/// Write an error in the requested format.
pub fn write_error(w: &mut dyn Write, mode: OutputMode, error: &CliError) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({ "error": error });
            serde_json::to_writer_pretty(&mut *w, &wrapper).map_err(io::Error::other)?;
            writeln!(w)
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(w, "error: {}", error.message)?;
            if let Some(serde_json::Value::Object(fields)) = &error.fields {
                for (field, message) in fields {
                    writeln!(w, "  {field}: {}", message.as_str().unwrap_or_default())?;
                }
            }
            if let Some(ref suggestion) = error.suggestion {
                writeln!(w, "hint: {suggestion}")?;
            }
            Ok(())
        }
    }
}

/// Render an error to stderr.
pub fn render_error(mode: OutputMode, error: &CliError) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(&mut out, mode, error)
}

/// Context attached to an error whose report is already on stderr.
///
/// `main` checks for it so a failure is printed exactly once.
#[derive(Debug, Clone, Copy)]
pub struct ErrorRendered;

impl fmt::Display for ErrorRendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error already reported")
    }
}

/// Whether `err` was already written by [`render_error`].
pub fn is_rendered(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ErrorRendered>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use incidents_core::seed::sample_incidents;
    use incidents_core::validate::validate;

    fn written(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn mode_from_name_defaults_to_pretty() {
        assert_eq!(OutputMode::from_name("json"), OutputMode::Json);
        assert_eq!(OutputMode::from_name("text"), OutputMode::Text);
        assert_eq!(OutputMode::from_name("pretty"), OutputMode::Pretty);
        assert_eq!(OutputMode::from_name("anything"), OutputMode::Pretty);
    }

    #[test]
    fn json_list_is_a_valid_array() {
        let incidents = sample_incidents();
        let refs: Vec<&Incident> = incidents.iter().collect();
        let out = written(|w| write_list(w, &refs, OutputMode::Json, "none"));
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert_eq!(parsed[1]["severity"], "High");
    }

    #[test]
    fn empty_json_list_is_empty_array() {
        let refs: Vec<&Incident> = Vec::new();
        let out = written(|w| write_list(w, &refs, OutputMode::Json, "none"));
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed.as_array().unwrap().is_empty());
    }

    #[test]
    fn text_list_has_header_and_rows() {
        let incidents = sample_incidents();
        let refs: Vec<&Incident> = incidents.iter().collect();
        let out = written(|w| write_list(w, &refs, OutputMode::Text, "none"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id  severity  reported_at  title");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1  Medium  2025-03-15T10:00:00+00:00"));
    }

    #[test]
    fn pretty_empty_list_prints_message() {
        let refs: Vec<&Incident> = Vec::new();
        let out = written(|w| {
            write_list(w, &refs, OutputMode::Pretty, EMPTY_LIST_MESSAGE)
        });
        assert_eq!(out, "No incidents found matching the current filters.\n");
    }

    #[test]
    fn pretty_item_shows_severity_and_date() {
        let incidents = sample_incidents();
        let out = written(|w| write_item(w, &incidents[1], OutputMode::Pretty));
        assert!(out.contains("LLM Hallucination in Critical Info"));
        assert!(out.contains("[High]"));
        assert!(out.contains("2025 at"));
    }

    #[test]
    fn field_errors_render_in_json() {
        let errors = validate("", "Desc", None).unwrap_err();
        let err = CliError::from_field_errors(&errors);
        let out = written(|w| write_error(w, OutputMode::Json, &err));
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["error"]["error_code"], "validation_failed");
        assert_eq!(parsed["error"]["fields"]["title"], "Title is required");
        assert_eq!(parsed["error"]["fields"]["severity"], "Severity is required");
        assert!(parsed["error"]["fields"].get("description").is_none());
    }

    #[test]
    fn field_errors_render_as_text_lines() {
        let errors = validate("", "", Some(incidents_core::Severity::Low)).unwrap_err();
        let err = CliError::from_field_errors(&errors);
        let out = written(|w| write_error(w, OutputMode::Text, &err));
        assert!(out.contains("  title: Title is required"));
        assert!(out.contains("  description: Description is required"));
        assert!(out.contains("hint:"));
    }

    #[test]
    fn rendered_marker_is_found_through_context() {
        let err = anyhow::anyhow!("seed unreadable").context(ErrorRendered);
        assert!(is_rendered(&err));
        assert!(!is_rendered(&anyhow::anyhow!("seed unreadable")));
    }
}
