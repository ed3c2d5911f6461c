//! App event channel wrapper.
//!
//! Centralizes how background tasks send [`AppEvent`] values to the main
//! loop so send failures are logged instead of panicking (the receiver
//! disappears when the app is shutting down; late completions are
//! harmless).

use tokio::sync::mpsc::UnboundedSender;

use crate::app_event::AppEvent;

/// Lightweight handle for sending [`AppEvent`] values to the app loop.
#[derive(Clone, Debug)]
pub struct AppEventSender {
    app_event_tx: UnboundedSender<AppEvent>,
}

impl AppEventSender {
    pub fn new(app_event_tx: UnboundedSender<AppEvent>) -> Self {
        Self { app_event_tx }
    }

    /// Send an event, logging failures instead of panicking.
    pub fn send(&self, event: AppEvent) {
        if let Err(e) = self.app_event_tx.send(event) {
            tracing::debug!("dropping app event after shutdown: {e}");
        }
    }
}
