//! Results region: strategy triggers, path list, and error messaging.

use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use wikilinks_core::SearchError;
use wikilinks_core::Strategy;

/// Wikipedia article URL for a path entry.
pub fn article_url(name: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", name.replace(' ', "_"))
}

/// Render-side view of the coordinator state.
pub struct PathResults<'a> {
    path: &'a [String],
    error: SearchError,
    active: Option<Strategy>,
}

impl<'a> PathResults<'a> {
    pub fn new(path: &'a [String], error: SearchError, active: Option<Strategy>) -> Self {
        Self {
            path,
            error,
            active,
        }
    }

    fn trigger_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (key, strategy) in [("Ctrl+B", Strategy::BreadthFirst), ("Ctrl+D", Strategy::DepthFirst)]
        {
            let running = self.active == Some(strategy);
            // The alternate trigger is disabled while one strategy is
            // awaiting a response; its own trigger stays enabled.
            let blocked = self.active.is_some_and(|active| active != strategy);
            let style = if running {
                Style::default().cyan().bold()
            } else if blocked {
                Style::default().dim().crossed_out()
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!("[{key}] "), style));
            spans.push(Span::styled(strategy.label(), style));
            if running {
                spans.push(Span::styled(" (searching...)", Style::default().cyan()));
            }
            spans.push(Span::raw("   "));
        }
        Line::from(spans)
    }
}

impl Widget for PathResults<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(area);

        Paragraph::new(self.trigger_line()).render(chunks[0], buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Path ({}) ", self.path.len()));
        let inner = block.inner(chunks[1]);
        block.render(chunks[1], buf);

        if let Some(message) = self.error.message() {
            Paragraph::new(Span::styled(message, Style::default().red()))
                .render(inner, buf);
            return;
        }

        if self.path.is_empty() {
            Paragraph::new(Span::styled(
                "Select articles then start a search",
                Style::default().dim().italic(),
            ))
            .render(inner, buf);
            return;
        }

        let lines: Vec<Line> = self
            .path
            .iter()
            .map(|name| {
                Line::from(vec![
                    Span::raw(name.as_str()),
                    Span::raw("  "),
                    Span::styled(article_url(name), Style::default().dim().underlined()),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
