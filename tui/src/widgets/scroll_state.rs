//! Selection and scroll bookkeeping for the suggestion list.
//!
//! Content-agnostic: callers supply the list length and the number of
//! visible rows, and must re-clamp whenever the list changes length.

/// Selection plus scroll window for a vertical list.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollState {
    /// Highlighted row, or `None` when the list is empty.
    pub selected_idx: Option<usize>,
    /// First row currently inside the viewport.
    pub scroll_top: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.selected_idx = None;
        self.scroll_top = 0;
    }

    /// Keep the selection valid after the list length changed.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.reset();
        } else {
            self.selected_idx = Some(self.selected_idx.unwrap_or(0).min(len - 1));
        }
    }

    /// Move the selection up one row, wrapping to the bottom.
    pub fn move_up_wrap(&mut self, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.selected_idx = Some(match self.selected_idx {
            Some(idx) if idx > 0 => idx - 1,
            Some(_) => len - 1,
            None => 0,
        });
    }

    /// Move the selection down one row, wrapping to the top.
    pub fn move_down_wrap(&mut self, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.selected_idx = Some(match self.selected_idx {
            Some(idx) if idx + 1 < len => idx + 1,
            _ => 0,
        });
    }

    /// Slide the scroll window so the selected row is visible.
    pub fn ensure_visible(&mut self, len: usize, visible_rows: usize) {
        if len == 0 || visible_rows == 0 {
            self.scroll_top = 0;
            return;
        }
        match self.selected_idx {
            Some(selected) if selected < self.scroll_top => {
                self.scroll_top = selected;
            }
            Some(selected) if selected >= self.scroll_top + visible_rows => {
                self.scroll_top = selected + 1 - visible_rows;
            }
            Some(_) => {}
            None => self.scroll_top = 0,
        }
    }
}
