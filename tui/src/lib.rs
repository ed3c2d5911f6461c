//! Terminal front end for the wikilinks client.
//!
//! Architecture follows the event-driven shape of the rest of the
//! codebase: an [`app_event::AppEvent`] channel carries completions from
//! background network tasks back into the single-threaded [`app::App`]
//! loop, which merges them with crossterm input events under
//! `tokio::select!` and re-renders after every event.

pub mod app;
pub mod app_event;
pub mod app_event_sender;
pub mod terminal;
pub mod widgets;

pub use app::App;
pub use app_event::AppEvent;
pub use app_event::FieldId;

use wikilinks_core::ServiceConfig;

/// Run the TUI against the given service addresses.
///
/// Sets up the terminal, runs the app loop until the user quits, and
/// restores the terminal even when the loop errors.
pub async fn run_tui(config: ServiceConfig) -> anyhow::Result<()> {
    let mut terminal = terminal::init()?;

    let mut app = App::new(config);
    let result = app.run(&mut terminal).await;

    terminal::restore()?;

    result
}
