//! `incidents list`: print the filtered, sorted incident list.

use crate::output::{EMPTY_LIST_MESSAGE, OutputMode, render_list};
use clap::Args;
use incidents_core::{IncidentStore, SeverityFilter, SortOrder};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by severity: all, low, medium, high.
    #[arg(short, long)]
    pub severity: Option<SeverityFilter>,

    /// Sort by report date: newest or oldest.
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

/// Print `list_view` for the requested filter and sort.
///
/// Flags left unset fall back to the store's configured view.
pub fn run_list(args: &ListArgs, store: &IncidentStore, output: OutputMode) -> anyhow::Result<()> {
    let filter = args.severity.unwrap_or_else(|| store.filter());
    let sort = args.sort.unwrap_or_else(|| store.sort());
    let view = store.list_view(filter, sort);
    tracing::debug!(%filter, %sort, shown = view.len(), "listing incidents");
    render_list(&view, output, EMPTY_LIST_MESSAGE)?;
    Ok(())
}
