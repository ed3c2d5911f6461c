//! Single-line article name input.
//!
//! Holds the text and byte-offset cursor for one endpoint field and
//! renders it as a bordered box with a loading spinner in the title
//! while a lookup for this field is in flight.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

/// Spinner frames cycled by the app tick while a lookup is pending.
const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Editable text state for one endpoint field.
#[derive(Debug, Clone, Default)]
pub struct ArticleInputState {
    text: String,
    /// Byte offset of the cursor within `text`, always on a char boundary.
    cursor: usize,
}

impl ArticleInputState {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole text (used when a suggestion is selected).
    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let boundary = self.prev_boundary();
        self.text.remove(boundary);
        self.cursor = boundary;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        self.text.clear();
        self.cursor = 0;
        true
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// Render-side view of one endpoint field.
pub struct ArticleInput<'a> {
    state: &'a ArticleInputState,
    label: &'static str,
    focused: bool,
    loading: bool,
    spinner_frame: usize,
}

impl<'a> ArticleInput<'a> {
    pub fn new(
        state: &'a ArticleInputState,
        label: &'static str,
        focused: bool,
        loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            label,
            focused,
            loading,
            spinner_frame,
        }
    }
}

impl Widget for ArticleInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().cyan()
        } else {
            Style::default().dim()
        };

        let title = if self.loading {
            let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            format!(" {} {frame} ", self.label)
        } else {
            format!(" {} ", self.label)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let text = &self.state.text;
        if self.focused {
            // Inline cursor: render the char under the cursor reversed.
            let before = &text[..self.state.cursor];
            let at = text[self.state.cursor..]
                .chars()
                .next()
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after = if self.state.cursor < text.len() {
                &text[self.state.cursor + at.len()..]
            } else {
                ""
            };
            let line = Line::from(vec![
                Span::raw(before),
                Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
                Span::raw(after),
            ]);
            Paragraph::new(line).render(inner, buf);
        } else if text.is_empty() {
            Paragraph::new(Span::styled("Type to search...", Style::default().dim().italic()))
                .render(inner, buf);
        } else {
            Paragraph::new(text.as_str()).render(inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn editing_respects_char_boundaries() {
        let mut state = ArticleInputState::default();
        for c in "Åland".chars() {
            state.insert(c);
        }
        assert_eq!(state.text(), "Åland");

        state.move_start();
        state.move_right();
        state.backspace();
        assert_eq!(state.text(), "land");

        state.move_end();
        assert!(state.backspace());
        assert_eq!(state.text(), "lan");
    }

    #[test]
    fn delete_removes_at_cursor() {
        let mut state = ArticleInputState::default();
        state.set_text("abc".to_string());
        state.move_start();
        assert!(state.delete());
        assert_eq!(state.text(), "bc");
        state.move_end();
        assert!(!state.delete());
    }

    #[test]
    fn clear_reports_whether_anything_changed() {
        let mut state = ArticleInputState::default();
        assert!(!state.clear());
        state.insert('x');
        assert!(state.clear());
        assert_eq!(state.text(), "");
    }
}
