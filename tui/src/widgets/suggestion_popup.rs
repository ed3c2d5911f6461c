//! Render-ready state for one field's suggestion popup.
//!
//! The popup sits between the async lookups and rendering. It tracks the
//! sequence number of the lookup whose names are on screen versus the
//! most recently dispatched one, so results that arrive out of order can
//! never regress the visible list — the same check the lookup stream
//! applies, repeated here because this struct also decides between the
//! "loading" and "no matches" empty states.
//!
//! The popup does not execute lookups. The app drives it with
//! [`SuggestionPopup::set_query`] when a dispatch happens and
//! [`SuggestionPopup::set_names`] when a result is accepted.

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

use super::scroll_state::ScrollState;

/// Maximum number of suggestion rows the popup will display.
pub const MAX_POPUP_ROWS: usize = 8;

/// Suggestion list state machine for one endpoint field.
pub struct SuggestionPopup {
    /// Text that produced the currently displayed `names`.
    display_query: String,
    /// Most recently dispatched text, which may not have answered yet.
    pending_query: String,
    /// Sequence number of the most recent dispatch; names arriving with
    /// any other sequence are stale and ignored.
    pending_seq: u64,
    /// Waiting on results for `pending_seq`; switches the empty state
    /// between "loading" and the neutral prompt.
    waiting: bool,
    names: Vec<String>,
    state: ScrollState,
}

impl SuggestionPopup {
    pub fn new() -> Self {
        Self {
            display_query: String::new(),
            pending_query: String::new(),
            pending_seq: 0,
            waiting: false,
            names: Vec::new(),
            state: ScrollState::new(),
        }
    }

    /// Record a new dispatch and enter the waiting state.
    ///
    /// Existing names stay visible while the newer lookup runs if the new
    /// text extends what produced them; otherwise the list and selection
    /// reset so unrelated result sets don't mix.
    pub fn set_query(&mut self, query: &str, seq: u64) {
        let keep_existing = query.starts_with(self.display_query.as_str());

        self.pending_query.clear();
        self.pending_query.push_str(query);
        self.pending_seq = seq;
        self.waiting = true;

        if !keep_existing {
            self.names.clear();
            self.state.reset();
        }
    }

    /// Replace the displayed names with an accepted lookup result.
    ///
    /// Results for a superseded dispatch are dropped so the UI cannot
    /// regress to an older lookup.
    pub fn set_names(&mut self, seq: u64, names: Vec<String>) {
        if seq != self.pending_seq {
            return; // Stale response.
        }

        self.display_query = self.pending_query.clone();
        self.names = names;
        self.waiting = false;
        let len = self.names.len();
        self.state.clamp_selection(len);
        self.state.ensure_visible(len, len.min(MAX_POPUP_ROWS));
    }

    pub fn move_up(&mut self) {
        let len = self.names.len();
        self.state.move_up_wrap(len);
        self.state.ensure_visible(len, len.min(MAX_POPUP_ROWS));
    }

    pub fn move_down(&mut self) {
        let len = self.names.len();
        self.state.move_down_wrap(len);
        self.state.ensure_visible(len, len.min(MAX_POPUP_ROWS));
    }

    /// The highlighted name, if any.
    pub fn selected_name(&self) -> Option<&str> {
        self.state
            .selected_idx
            .and_then(|idx| self.names.get(idx))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Rows needed to render the current state, including the border.
    ///
    /// One row is reserved even when there are no names so the empty
    /// state (loading / prompt) stays visible.
    pub fn required_height(&self) -> u16 {
        self.names.len().clamp(1, MAX_POPUP_ROWS) as u16 + 2
    }
}

impl Default for SuggestionPopup {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &SuggestionPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).border_style(Style::default().dim());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.names.is_empty() {
            let message = if self.waiting {
                "loading..."
            } else {
                "Enter a search query"
            };
            Paragraph::new(Span::styled(message, Style::default().dim().italic()))
                .render(inner, buf);
            return;
        }

        let visible_rows = inner.height as usize;
        let top = self.state.scroll_top.min(self.names.len().saturating_sub(1));
        for (row, (idx, name)) in self
            .names
            .iter()
            .enumerate()
            .skip(top)
            .take(visible_rows)
            .enumerate()
        {
            let selected = self.state.selected_idx == Some(idx);
            let style = if selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let line = Line::from(Span::styled(name.as_str(), style));
            let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
            Paragraph::new(line).render(row_area, buf);
        }
    }
}
