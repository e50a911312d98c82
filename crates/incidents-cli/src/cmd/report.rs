//! `incidents report`: validate and submit a new incident.
//!
//! The store lives only for this invocation, so the created record is
//! printed and then discarded with the session.

use crate::output::{
    CliError, ErrorRendered, OutputMode, format_reported, pretty_kv, pretty_section, render_error,
    write_item,
};
use clap::Args;
use incidents_core::validate::validate_raw;
use incidents_core::{Incident, IncidentStore};
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Incident title.
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// What happened.
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Severity: low, medium, or high.
    #[arg(short, long, default_value = "")]
    pub severity: String,
}

/// Submit the report; on validation failure print every field error and fail.
pub fn run_report(
    args: &ReportArgs,
    store: &mut IncidentStore,
    output: OutputMode,
) -> anyhow::Result<()> {
    let draft = match validate_raw(&args.title, &args.description, &args.severity) {
        Ok(draft) => draft,
        Err(errors) => {
            render_error(output, &CliError::from_field_errors(&errors))?;
            return Err(anyhow::Error::new(errors).context(ErrorRendered));
        }
    };

    let created = store.add_incident(draft);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_created(&mut out, &created, output)?;
    Ok(())
}

fn write_created(w: &mut dyn Write, incident: &Incident, output: OutputMode) -> io::Result<()> {
    match output {
        OutputMode::Json | OutputMode::Text => write_item(w, incident, output),
        OutputMode::Pretty => {
            pretty_section(w, &format!("Reported incident #{}", incident.id()))?;
            pretty_kv(w, "Title", incident.title())?;
            pretty_kv(w, "Severity", incident.severity().to_string())?;
            pretty_kv(w, "Reported", format_reported(incident.reported_at()))?;
            writeln!(w)?;
            writeln!(w, "{}", incident.description())
        }
    }
}
