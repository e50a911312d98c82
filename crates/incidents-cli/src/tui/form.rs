//! "Report New Incident" modal.
//!
//! Wraps [`IncidentForm`] with per-field editors and focus handling. Field
//! errors from a rejected submission render inline under each field.

use super::text_input::{LineInput, TextArea, with_cursor};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use incidents_core::{FormField, Incident, IncidentForm, IncidentStore, Severity};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Title,
    Description,
    Severity,
}

impl Focus {
    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Severity,
            Self::Severity => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Severity,
            Self::Description => Self::Title,
            Self::Severity => Self::Description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct ReportModal {
    focus: Focus,
    title: LineInput,
    description: TextArea,
    form: IncidentForm,
}

impl ReportModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear input, errors, and focus for a fresh report.
    pub fn reset(&mut self) {
        self.focus = Focus::default();
        self.title = LineInput::default();
        self.description = TextArea::default();
        self.form.reset();
    }

    pub const fn severity(&self) -> Option<Severity> {
        self.form.severity
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.form.error(field)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ModalAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Esc => return ModalAction::Cancel,
            KeyCode::Char('s') if ctrl => return ModalAction::Submit,
            KeyCode::Enter if ctrl => return ModalAction::Submit,
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return ModalAction::None;
            }
            KeyCode::Tab if shift => {
                self.focus = self.focus.prev();
                return ModalAction::None;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return ModalAction::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Title => {
                if key.code == KeyCode::Enter {
                    self.focus = Focus::Description;
                } else {
                    self.title.handle_key(key);
                }
            }
            Focus::Description => {
                self.description.handle_key(key);
            }
            Focus::Severity => self.pick_severity(key.code),
        }

        ModalAction::None
    }

    fn pick_severity(&mut self, code: KeyCode) {
        let current = self.form.severity;
        self.form.severity = match code {
            KeyCode::Char('l') => Some(Severity::Low),
            KeyCode::Char('m') => Some(Severity::Medium),
            KeyCode::Char('h') => Some(Severity::High),
            KeyCode::Right | KeyCode::Down => Some(match current {
                None => Severity::Low,
                Some(Severity::Low) => Severity::Medium,
                Some(Severity::Medium | Severity::High) => Severity::High,
            }),
            KeyCode::Left | KeyCode::Up => Some(match current {
                None | Some(Severity::Low | Severity::Medium) => Severity::Low,
                Some(Severity::High) => Severity::Medium,
            }),
            _ => current,
        };
    }

    /// Copy editor contents into the form and submit it to `store`.
    pub fn submit(&mut self, store: &mut IncidentStore) -> Option<Incident> {
        self.form.title = self.title.text().to_string();
        self.form.description = self.description.text();
        self.form.submit(store)
    }

    pub fn cancel(&mut self, store: &mut IncidentStore) {
        self.form.cancel(store);
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let modal_width = area.width.saturating_sub(4).min(80);
        let modal_height = area.height.saturating_sub(2).min(18);
        let x = area.x + area.width.saturating_sub(modal_width) / 2;
        let y = area.y + area.height.saturating_sub(modal_height) / 2;
        let modal_area = Rect::new(x, y, modal_width, modal_height);

        frame.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(modal_area);

        let title_focused = self.focus == Focus::Title;
        let title_text = if title_focused {
            with_cursor(self.title.text(), self.title.cursor())
        } else {
            self.title.text().to_string()
        };
        frame.render_widget(
            Paragraph::new(title_text).block(field_block(" Title ", title_focused)),
            chunks[0],
        );
        render_field_error(frame, self.error(FormField::Title), chunks[1]);

        let desc_focused = self.focus == Focus::Description;
        let (row, col) = self.description.cursor();
        let desc_lines: Vec<Line<'static>> = self
            .description
            .lines()
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                if desc_focused && idx == row {
                    Line::from(with_cursor(line, col))
                } else {
                    Line::from(line.clone())
                }
            })
            .collect();
        let desc_title = if desc_focused {
            " Description --- Press <tab> to switch fields "
        } else {
            " Description "
        };
        let desc_block = field_block(desc_title, desc_focused);
        let desc_inner = desc_block.inner(chunks[2]);
        let scroll = description_scroll(&self.description, desc_inner);
        frame.render_widget(
            Paragraph::new(desc_lines)
                .block(desc_block)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            chunks[2],
        );
        render_field_error(frame, self.error(FormField::Description), chunks[3]);

        let sev_focused = self.focus == Focus::Severity;
        let sev_block = field_block(" Severity --- Press <ctrl+s> to submit ", sev_focused);
        let sev_inner = sev_block.inner(chunks[4]);
        frame.render_widget(sev_block, chunks[4]);
        let mut spans = Vec::with_capacity(Severity::ALL.len() * 2);
        for severity in Severity::ALL {
            let style = if self.severity() == Some(severity) {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(format!(" {severity} "), style));
            spans.push(Span::raw("  "));
        }
        if self.severity().is_none() {
            spans.push(Span::styled(
                "(select: l / m / h)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), sev_inner);
        render_field_error(frame, self.error(FormField::Severity), chunks[5]);
    }
}

/// Rows to scroll so the cursor's wrapped line stays inside `inner`.
fn description_scroll(area: &TextArea, inner: Rect) -> u16 {
    let width = usize::from(inner.width.max(1));
    let height = usize::from(inner.height.max(1));
    let (row, col) = area.cursor();
    let above: usize = area.lines()[..row]
        .iter()
        .map(|line| line.chars().count() / width + 1)
        .sum();
    let cursor_line = above + col / width;
    u16::try_from(cursor_line.saturating_sub(height - 1)).unwrap_or(u16::MAX)
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border_color = if focused { Color::Green } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(border_color))
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
}

fn render_field_error(frame: &mut Frame<'_>, message: Option<&str>, area: Rect) {
    let line = message.map_or_else(Line::default, |msg| {
        Line::from(Span::styled(format!(" {msg}"), Style::default().fg(Color::Red)))
    });
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(line), area);
}
