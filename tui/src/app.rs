//! Main application state machine.
//!
//! One `App` owns the two endpoint fields (each with its own lookup
//! stream and suggestion popup), the search coordinator, and the event
//! loop that merges terminal input with completions from background
//! network tasks.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::StreamExt;
use wikilinks_core::LookupStream;
use wikilinks_core::LookupUpdate;
use wikilinks_core::PathClient;
use wikilinks_core::SearchCoordinator;
use wikilinks_core::ServiceConfig;
use wikilinks_core::Strategy;

use crate::app_event::AppEvent;
use crate::app_event::FieldId;
use crate::app_event_sender::AppEventSender;
use crate::terminal::Tui;
use crate::widgets::ArticleInput;
use crate::widgets::ArticleInputState;
use crate::widgets::PathResults;
use crate::widgets::SuggestionPopup;

/// One endpoint field: its text, its lookup stream, and its popup.
///
/// The two instances are identical in behavior; only the field id they
/// stamp on their lookup completions differs.
struct EndpointField {
    input: ArticleInputState,
    popup: SuggestionPopup,
    stream: LookupStream,
}

impl EndpointField {
    fn new(id: FieldId, client: &Arc<PathClient>, events: &AppEventSender) -> Self {
        let events = events.clone();
        let stream = LookupStream::new(
            Arc::clone(client),
            Arc::new(move |update| {
                events.send(AppEvent::LookupUpdate { field: id, update });
            }),
        );
        Self {
            input: ArticleInputState::default(),
            popup: SuggestionPopup::new(),
            stream,
        }
    }

    /// The field text changed (typed edit, clear, or suggestion pick):
    /// cancel-and-redispatch the lookup and move the popup into its
    /// waiting state.
    fn dispatch_lookup(&mut self) {
        let seq = self.stream.set_text(self.input.text());
        self.popup.set_query(self.input.text(), seq);
    }

    /// Route one lookup completion through the stream's staleness check
    /// and into the popup.
    fn apply_update(&mut self, update: LookupUpdate) {
        let seq = update.seq;
        if self.stream.apply(update) {
            self.popup.set_names(seq, self.stream.suggestions().to_vec());
        }
    }

    /// Copy the highlighted suggestion into the field. This is treated
    /// identically to a typed edit, including when the suggestion equals
    /// the current text.
    fn select_suggestion(&mut self) {
        if let Some(name) = self.popup.selected_name() {
            let name = name.to_string();
            self.input.set_text(name);
            self.dispatch_lookup();
        }
    }
}

/// Main TUI application state.
pub struct App {
    from: EndpointField,
    to: EndpointField,
    focus: FieldId,
    coordinator: SearchCoordinator,
    events_tx: AppEventSender,
    events_rx: UnboundedReceiver<AppEvent>,
    spinner_frame: usize,
    should_quit: bool,
}

impl App {
    /// Create the app and prime both fields.
    ///
    /// Must be called inside a tokio runtime: the initial (empty) field
    /// values trigger lookups exactly like any later edit would.
    pub fn new(config: ServiceConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let events = AppEventSender::new(tx);
        let client = Arc::new(PathClient::new(config));

        let mut from = EndpointField::new(FieldId::From, &client, &events);
        let mut to = EndpointField::new(FieldId::To, &client, &events);
        from.dispatch_lookup();
        to.dispatch_lookup();

        let settle_events = events.clone();
        let coordinator = SearchCoordinator::new(
            client,
            Arc::new(move |settlement| {
                settle_events.send(AppEvent::SearchSettled(settlement));
            }),
        );

        Self {
            from,
            to,
            focus: FieldId::From,
            coordinator,
            events_tx: events,
            events_rx: rx,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Run the main loop until the user quits.
    pub async fn run(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        let mut input_events = EventStream::new();

        let tick_events = self.events_tx.clone();
        let tick_task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(100));
            loop {
                interval.tick().await;
                tick_events.send(AppEvent::Tick);
            }
        });

        loop {
            terminal.draw(|frame| self.render(frame.area(), frame.buffer_mut()))?;

            tokio::select! {
                Some(event) = input_events.next() => {
                    if let Ok(event) = event {
                        self.handle_crossterm_event(event);
                    }
                }
                Some(event) = self.events_rx.recv() => {
                    self.handle_app_event(event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        tick_task.abort();
        Ok(())
    }

    fn handle_crossterm_event(&mut self, event: CrosstermEvent) {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key(key);
            }
            CrosstermEvent::Paste(text) => {
                let field = self.focused_field_mut();
                for c in text.chars() {
                    field.input.insert(c);
                }
                field.dispatch_lookup();
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('b') => self.trigger(Strategy::BreadthFirst),
                KeyCode::Char('d') => self.trigger(Strategy::DepthFirst),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.other();
            }
            KeyCode::Up => self.focused_field_mut().popup.move_up(),
            KeyCode::Down => self.focused_field_mut().popup.move_down(),
            KeyCode::Enter => self.focused_field_mut().select_suggestion(),
            KeyCode::Esc => {
                let field = self.focused_field_mut();
                if field.input.clear() {
                    field.dispatch_lookup();
                }
            }
            KeyCode::Char(c) => {
                let field = self.focused_field_mut();
                field.input.insert(c);
                field.dispatch_lookup();
            }
            KeyCode::Backspace => {
                let field = self.focused_field_mut();
                if field.input.backspace() {
                    field.dispatch_lookup();
                }
            }
            KeyCode::Delete => {
                let field = self.focused_field_mut();
                if field.input.delete() {
                    field.dispatch_lookup();
                }
            }
            KeyCode::Left => self.focused_field_mut().input.move_left(),
            KeyCode::Right => self.focused_field_mut().input.move_right(),
            KeyCode::Home => self.focused_field_mut().input.move_start(),
            KeyCode::End => self.focused_field_mut().input.move_end(),
            _ => {}
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LookupUpdate { field, update } => {
                self.field_mut(field).apply_update(update);
            }
            AppEvent::SearchSettled(settlement) => {
                self.coordinator.apply_settlement(settlement);
            }
            AppEvent::Tick => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }
        }
    }

    /// Start a traversal, reading both field texts at this moment. The
    /// trigger for the strategy the coordinator has NOT got in flight is
    /// rejected; re-triggering the in-flight strategy is allowed.
    fn trigger(&mut self, strategy: Strategy) {
        if self.coordinator.is_blocked(strategy) {
            return;
        }
        self.coordinator
            .start(strategy, self.from.input.text(), self.to.input.text());
    }

    fn field_mut(&mut self, id: FieldId) -> &mut EndpointField {
        match id {
            FieldId::From => &mut self.from,
            FieldId::To => &mut self.to,
        }
    }

    fn focused_field_mut(&mut self) -> &mut EndpointField {
        self.field_mut(self.focus)
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // header
            Constraint::Length(3), // endpoint fields
            Constraint::Min(6),    // triggers + results
            Constraint::Length(1), // footer
        ])
        .split(area);

        let header = Line::from(vec![
            Span::styled(" wiki", Style::default().bold()),
            Span::styled("links", Style::default().dim().bold()),
            Span::raw("  find a link path between two articles"),
        ]);
        Paragraph::new(header).render(chunks[0], buf);

        let field_areas =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);
        for (id, field, field_area) in [
            (FieldId::From, &self.from, field_areas[0]),
            (FieldId::To, &self.to, field_areas[1]),
        ] {
            ArticleInput::new(
                &field.input,
                id.label(),
                self.focus == id,
                field.stream.is_loading(),
                self.spinner_frame,
            )
            .render(field_area, buf);
        }

        PathResults::new(
            self.coordinator.path(),
            self.coordinator.error(),
            self.coordinator.active(),
        )
        .render(chunks[2], buf);

        let footer = " Tab switch field | Up/Down pick suggestion | Enter select | Ctrl+B/Ctrl+D search | Ctrl+C quit";
        Paragraph::new(Span::styled(footer, Style::default().dim())).render(chunks[3], buf);

        // Suggestion popup for the focused field, drawn last so it
        // overlays the results region beneath the field.
        let field_area = match self.focus {
            FieldId::From => field_areas[0],
            FieldId::To => field_areas[1],
        };
        let popup = &self.focused_field().popup;
        let max_height = area.bottom().saturating_sub(field_area.bottom());
        let height = popup.required_height().min(max_height);
        if height > 2 {
            let popup_area = Rect::new(field_area.x, field_area.bottom(), field_area.width, height);
            popup.render(popup_area, buf);
        }
    }

    fn focused_field(&self) -> &EndpointField {
        match self.focus {
            FieldId::From => &self.from,
            FieldId::To => &self.to,
        }
    }
}
