//! Incident dashboard view.
//!
//! Layout, top to bottom:
//! - header with the severity filter and sort controls
//! - incident table; the expanded row shows its description inline
//! - status bar with key hints or a transient message
//!
//! Key bindings: j/k navigate, Enter/Space view or hide details, f/F cycle the
//! severity filter, s toggle sort, n report a new incident, q quit.

use super::form::{ModalAction, ReportModal};
use crate::output::{EMPTY_LIST_MESSAGE, format_reported};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use incidents_core::{Incident, IncidentStore, Severity, SeverityFilter};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};
use std::time::{Duration, Instant};

const STATUS_TTL: Duration = Duration::from_secs(3);
const SEVERITY_COL: u16 = 10;
const REPORTED_COL: u16 = 26;
const DETAILS_COL: u16 = 14;
const HIGHLIGHT_SYMBOL: &str = "▸ ";

/// Badge colour per severity: Low yellow, Medium orange, High red.
pub const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => Color::Yellow,
        Severity::Medium => Color::Rgb(255, 165, 0),
        Severity::High => Color::Red,
    }
}

pub struct DashboardView {
    store: IncidentStore,
    modal: ReportModal,
    table_state: TableState,
    should_quit: bool,
    status_msg: Option<(String, Instant)>,
}

impl DashboardView {
    pub fn new(store: IncidentStore) -> Self {
        let mut view = Self {
            modal: ReportModal::new(),
            store,
            table_state: TableState::default(),
            should_quit: false,
            status_msg: None,
        };
        view.reselect(None);
        view
    }

    #[cfg(test)]
    pub const fn store(&self) -> &IncidentStore {
        &self.store
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_msg = Some((msg, Instant::now()));
    }

    /// Drop the status message once it has been shown long enough.
    pub fn tick(&mut self) {
        if self
            .status_msg
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() >= STATUS_TTL)
        {
            self.status_msg = None;
        }
    }

    fn visible_ids(&self) -> Vec<u64> {
        self.store.visible().iter().map(|i| i.id()).collect()
    }

    fn selected_id(&self) -> Option<u64> {
        let idx = self.table_state.selected()?;
        self.visible_ids().get(idx).copied()
    }

    /// Select `id` if it is visible, otherwise the first row (or nothing).
    fn reselect(&mut self, id: Option<u64>) {
        let ids = self.visible_ids();
        let idx = id
            .and_then(|id| ids.iter().position(|v| *v == id))
            .or_else(|| (!ids.is_empty()).then_some(0));
        self.table_state.select(idx);
    }

    // -----------------------------------------------------------------------
    // Key event handling
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
        } else if self.store.is_form_open() {
            self.handle_modal_key(key);
        } else {
            self.handle_normal_key(key);
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match self.modal.handle_key(key) {
            ModalAction::None => {}
            ModalAction::Cancel => self.modal.cancel(&mut self.store),
            ModalAction::Submit => {
                if let Some(created) = self.modal.submit(&mut self.store) {
                    self.reselect(Some(created.id()));
                    self.set_status(format!("Reported incident #{}", created.id()));
                }
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => self.reselect(None),
            KeyCode::Char('G') | KeyCode::End => {
                let len = self.visible_ids().len();
                if len > 0 {
                    self.table_state.select(Some(len - 1));
                }
            }

            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.selected_id() {
                    self.store.toggle_expanded(id);
                }
            }

            KeyCode::Char('f') => self.change_filter(self.store.filter().next()),
            KeyCode::Char('F') => self.change_filter(self.store.filter().prev()),
            KeyCode::Char('s') => {
                let selected = self.selected_id();
                self.store.set_sort(self.store.sort().toggled());
                self.reselect(selected);
            }

            KeyCode::Char('n') => {
                self.store.toggle_form();
                if self.store.is_form_open() {
                    self.modal.reset();
                }
            }
            _ => {}
        }
    }

    fn change_filter(&mut self, filter: SeverityFilter) {
        let selected = self.selected_id();
        self.store.set_filter(filter);
        self.reselect(selected);
    }

    fn select_next(&mut self) {
        let len = self.visible_ids().len();
        if len == 0 {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map_or(0, |i| if i + 1 >= len { len - 1 } else { i + 1 });
        self.table_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        if self.visible_ids().is_empty() {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(i));
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let controls = Paragraph::new(self.controls_line()).block(panel(" AI Safety Incidents "));
        frame.render_widget(controls, chunks[0]);
        self.render_table(frame, chunks[1]);
        frame.render_widget(Paragraph::new(self.status_line()), chunks[2]);

        if self.store.is_form_open() {
            self.modal.render(frame, area);
        }
    }

    fn controls_line(&self) -> Line<'static> {
        let label = Style::default().fg(Color::DarkGray);
        let mut spans = vec![Span::styled("Severity: ", label)];
        let current = self.store.filter();
        for option in SeverityFilter::OPTIONS {
            let style = if option == current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(format!(" {option} "), style));
        }
        spans.push(Span::raw("   "));
        spans.push(Span::styled("Sort: ", label));
        spans.push(Span::styled(
            self.store.sort().label(),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "[n] Report New Incident",
            Style::default().fg(Color::Green),
        ));
        Line::from(spans)
    }

    fn render_table(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let visible = self.store.visible();
        let block = panel(&format!(" Incidents ({} of {}) ", visible.len(), self.store.len()));

        if visible.is_empty() {
            let msg = Paragraph::new(EMPTY_LIST_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(msg, area);
            return;
        }

        // Title column width once borders, gutter, and column spacing are taken.
        let gutter = u16::try_from(HIGHLIGHT_SYMBOL.chars().count()).unwrap_or(u16::MAX);
        let title_width = area
            .width
            .saturating_sub(2 + gutter + SEVERITY_COL + REPORTED_COL + DETAILS_COL + 3)
            .max(10);
        let rows: Vec<Row<'static>> = visible
            .iter()
            .map(|incident| {
                incident_row(incident, self.store.is_expanded(incident.id()), title_width)
            })
            .collect();

        let header = Row::new(["Title", "Severity", "Reported", "Details"]).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        let table = Table::new(
            rows,
            [
                Constraint::Min(10),
                Constraint::Length(SEVERITY_COL),
                Constraint::Length(REPORTED_COL),
                Constraint::Length(DETAILS_COL),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(HIGHLIGHT_SYMBOL);

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn status_line(&self) -> Line<'static> {
        if let Some((ref msg, at)) = self.status_msg
            && at.elapsed() < STATUS_TTL
        {
            return Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Cyan)));
        }

        let key_style = Style::default().fg(Color::Cyan);
        let dim_style = Style::default().fg(Color::DarkGray);
        let hints: &[(&str, &str)] = if self.store.is_form_open() {
            &[
                ("TAB", " next field  "),
                ("SHIFT+TAB", " prev field  "),
                ("CTRL+S", " submit  "),
                ("ESC", " cancel"),
            ]
        } else {
            &[
                ("j/k", " move  "),
                ("ENTER", " details  "),
                ("f/F", " severity  "),
                ("s", " sort  "),
                ("n", " report  "),
                ("q", " quit"),
            ]
        };
        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(k, label)| {
                [
                    Span::styled((*k).to_string(), key_style),
                    Span::styled((*label).to_string(), dim_style),
                ]
            })
            .collect();
        Line::from(spans)
    }
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title.to_string())
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
}

fn incident_row(incident: &Incident, expanded: bool, title_width: u16) -> Row<'static> {
    let severity = incident.severity();
    let badge = Cell::from(Span::styled(
        format!(" {severity} "),
        Style::default()
            .fg(Color::Black)
            .bg(severity_color(severity))
            .add_modifier(Modifier::BOLD),
    ));
    let details = if expanded { "Hide Details" } else { "View Details" };

    let mut title_lines = vec![Line::from(Span::styled(
        incident.title().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if expanded {
        title_lines.push(Line::from(Span::styled(
            "Description:",
            Style::default().fg(Color::DarkGray),
        )));
        title_lines.extend(
            wrap_text(incident.description(), usize::from(title_width))
                .into_iter()
                .map(Line::from),
        );
    }
    let height = u16::try_from(title_lines.len()).unwrap_or(u16::MAX);

    Row::new(vec![
        Cell::from(Text::from(title_lines)),
        badge,
        Cell::from(format_reported(incident.reported_at())),
        Cell::from(Span::styled(details, Style::default().fg(Color::Cyan))),
    ])
    .height(height)
}

/// Greedy word wrap; words longer than `width` are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                }
                out.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            let needed = usize::from(!line.is_empty()) + word.chars().count();
            if line.chars().count() + needed > width && !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        out.push(line);
    }
    out
}
