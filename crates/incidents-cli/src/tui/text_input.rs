//! Editable text fields for the report modal.
//!
//! Cursor positions are char indices, not byte offsets.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line input with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply an editing key. Returns false for keys this field does not use.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(char_len(&self.text)),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = char_len(&self.text),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    remove_char_at(&mut self.text, self.cursor);
                }
            }
            KeyCode::Delete => remove_char_at(&mut self.text, self.cursor),
            KeyCode::Char(c) if !is_chord(key) => {
                insert_char_at(&mut self.text, self.cursor, c);
                self.cursor += 1;
            }
            _ => return false,
        }
        true
    }
}

/// Multi-line input. Always holds at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for TextArea {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }
}

impl TextArea {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as `(row, col)`.
    pub const fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = char_len(&self.lines[self.row]);
                }
            }
            KeyCode::Right => {
                if self.col < char_len(&self.lines[self.row]) {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
            }
            KeyCode::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.col = self.col.min(char_len(&self.lines[self.row]));
                }
            }
            KeyCode::Down => {
                if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = self.col.min(char_len(&self.lines[self.row]));
                }
            }
            KeyCode::Home => self.col = 0,
            KeyCode::End => self.col = char_len(&self.lines[self.row]),
            KeyCode::Enter => {
                let split_at = byte_index_at_char(&self.lines[self.row], self.col);
                let tail = self.lines[self.row].split_off(split_at);
                self.row += 1;
                self.col = 0;
                self.lines.insert(self.row, tail);
            }
            KeyCode::Backspace => {
                if self.col > 0 {
                    self.col -= 1;
                    remove_char_at(&mut self.lines[self.row], self.col);
                } else if self.row > 0 {
                    let current = self.lines.remove(self.row);
                    self.row -= 1;
                    self.col = char_len(&self.lines[self.row]);
                    self.lines[self.row].push_str(&current);
                }
            }
            KeyCode::Delete => {
                if self.col < char_len(&self.lines[self.row]) {
                    remove_char_at(&mut self.lines[self.row], self.col);
                } else if self.row + 1 < self.lines.len() {
                    let next = self.lines.remove(self.row + 1);
                    self.lines[self.row].push_str(&next);
                }
            }
            KeyCode::Char(c) if !is_chord(key) => {
                insert_char_at(&mut self.lines[self.row], self.col, c);
                self.col += 1;
            }
            _ => return false,
        }
        true
    }
}

/// Control and Alt chords are commands, never text.
fn is_chord(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map_or(value.len(), |(idx, _)| idx)
}

fn insert_char_at(value: &mut String, char_idx: usize, ch: char) {
    let idx = byte_index_at_char(value, char_idx);
    value.insert(idx, ch);
}

fn remove_char_at(value: &mut String, char_idx: usize) {
    if char_idx >= char_len(value) {
        return;
    }
    let start = byte_index_at_char(value, char_idx);
    let end = byte_index_at_char(value, char_idx + 1);
    value.replace_range(start..end, "");
}

/// `value` with a block cursor drawn at `char_idx`.
pub fn with_cursor(value: &str, char_idx: usize) -> String {
    let mut out = String::with_capacity(value.len() + 3);
    let mut inserted = false;
    for (idx, ch) in value.chars().enumerate() {
        if idx == char_idx {
            out.push('█');
            inserted = true;
        }
        out.push(ch);
    }
    if !inserted {
        out.push('█');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut LineInput, s: &str) {
        for c in s.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn line_input_inserts_at_cursor() {
        let mut input = LineInput::default();
        type_str(&mut input, "helo");
        input.handle_key(key(KeyCode::Left));
        type_str(&mut input, "l");
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn line_input_handles_multibyte_chars() {
        let mut input = LineInput::default();
        type_str(&mut input, "añb");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.text(), "ab");
        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.text(), "b");
    }

    #[test]
    fn line_input_ignores_enter() {
        let mut input = LineInput::default();
        assert!(!input.handle_key(key(KeyCode::Enter)));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn control_chords_are_not_typed() {
        let mut input = LineInput::default();
        type_str(&mut input, "ok");
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let alt_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT);
        assert!(!input.handle_key(ctrl_c));
        assert!(!input.handle_key(alt_a));
        assert_eq!(input.text(), "ok");

        let mut area = TextArea::default();
        assert!(!area.handle_key(ctrl_c));
        assert_eq!(area.text(), "");

        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert!(input.handle_key(shifted));
        assert_eq!(input.text(), "okA");
    }

    #[test]
    fn text_area_splits_and_joins_lines() {
        let mut area = TextArea::default();
        for c in "abcd".chars() {
            area.handle_key(key(KeyCode::Char(c)));
        }
        area.handle_key(key(KeyCode::Left));
        area.handle_key(key(KeyCode::Left));
        area.handle_key(key(KeyCode::Enter));
        assert_eq!(area.lines(), ["ab", "cd"]);
        assert_eq!(area.cursor(), (1, 0));
        assert_eq!(area.text(), "ab\ncd");

        area.handle_key(key(KeyCode::Backspace));
        assert_eq!(area.lines(), ["abcd"]);
        assert_eq!(area.cursor(), (0, 2));
    }

    #[test]
    fn text_area_vertical_moves_clamp_column() {
        let mut area = TextArea::default();
        for c in "long line".chars() {
            area.handle_key(key(KeyCode::Char(c)));
        }
        area.handle_key(key(KeyCode::Enter));
        area.handle_key(key(KeyCode::Char('x')));
        area.handle_key(key(KeyCode::Up));
        area.handle_key(key(KeyCode::End));
        area.handle_key(key(KeyCode::Down));
        assert_eq!(area.cursor(), (1, 1));
    }

    #[test]
    fn cursor_marker_is_appended_at_end() {
        assert_eq!(with_cursor("ab", 2), "ab█");
        assert_eq!(with_cursor("ab", 0), "█ab");
    }
}
