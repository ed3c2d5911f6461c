//! Core client logic for the wikilinks terminal client.
//!
//! This crate owns everything that talks to the remote services and the
//! request-coordination state machines the UI sits on top of:
//!
//! - [`PathClient`] — thin HTTP wrapper for the lookup and traversal
//!   endpoints.
//! - [`LookupStream`] — per-field incremental lookup with cooperative
//!   cancellation of superseded requests.
//! - [`SearchCoordinator`] — one-at-a-time traversal dispatch with
//!   status-driven outcome classification.
//!
//! No rendering happens here; the TUI crate consumes these types and
//! renders their state.

pub mod client;
pub mod config;
pub mod error;
pub mod lookup;
pub mod search;

pub use client::PathClient;
pub use config::ServiceConfig;
pub use error::LookupError;
pub use error::RouteError;
pub use lookup::LookupStream;
pub use lookup::LookupUpdate;
pub use search::RouteOutcome;
pub use search::SearchCoordinator;
pub use search::SearchError;
pub use search::Settlement;
pub use search::Strategy;
