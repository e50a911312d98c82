//! Initial incident sets: the built-in sample data or a JSON seed file.

use crate::model::{Incident, Severity};
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use tracing::debug;

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// The three sample incidents a fresh dashboard starts with.
#[must_use]
pub fn sample_incidents() -> Vec<Incident> {
    vec![
        Incident::new(
            1,
            "Biased Recommendation Algorithm".to_string(),
            "Algorithm consistently favored certain demographics...".to_string(),
            Severity::Medium,
            utc(2025, 3, 15, 10, 0),
        ),
        Incident::new(
            2,
            "LLM Hallucination in Critical Info".to_string(),
            "LLM provided incorrect safety procedure information...".to_string(),
            Severity::High,
            utc(2025, 4, 1, 14, 30),
        ),
        Incident::new(
            3,
            "Minor Data Leak via Chatbot".to_string(),
            "Chatbot inadvertently exposed non-sensitive user metadata...".to_string(),
            Severity::Low,
            utc(2025, 3, 20, 9, 15),
        ),
    ]
}

/// Read a JSON array of incident records.
///
/// The file is only read; nothing is written back.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// incident records.
pub fn load_seed_file(path: &Path) -> Result<Vec<Incident>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let incidents: Vec<Incident> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
    debug!(path = %path.display(), count = incidents.len(), "loaded seed file");
    Ok(incidents)
}
