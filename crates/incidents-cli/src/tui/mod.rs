//! Terminal user interface (TUI) for the incident dashboard.
//!
//! ## Entry points
//!
//! - [`run_dashboard`]: full-screen dashboard over an in-memory store.

pub mod dashboard;
pub mod form;
pub mod text_input;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use dashboard::DashboardView;
use incidents_core::IncidentStore;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::info;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the dashboard until the user quits. The terminal is restored on every
/// exit path, including errors from the event loop.
pub fn run_dashboard(store: IncidentStore) -> Result<()> {
    info!(incidents = store.len(), "dashboard session started");
    let mut terminal = ratatui::try_init().context("Failed to initialize terminal")?;
    let result = event_loop(&mut terminal, DashboardView::new(store));
    ratatui::try_restore().context("Failed to restore terminal")?;
    info!("dashboard session ended");
    result
}

fn event_loop(terminal: &mut DefaultTerminal, mut view: DashboardView) -> Result<()> {
    while !view.should_quit() {
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area);
            })
            .context("Failed to draw dashboard")?;

        if event::poll(POLL_INTERVAL).context("Failed to poll terminal events")?
            && let Event::Key(key) = event::read().context("Failed to read terminal event")?
            && key.kind == KeyEventKind::Press
        {
            view.handle_key(key);
        }
        view.tick();
    }
    Ok(())
}
