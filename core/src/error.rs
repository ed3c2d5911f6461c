//! Error types for the two remote call paths.
//!
//! Classified traversal outcomes (not-found, no-path, unknown status) are
//! data the UI renders, not errors, so they live in [`crate::search`] as
//! [`crate::RouteOutcome`]. The enums here cover only the faults that are
//! swallowed at the call boundary and logged.

use thiserror::Error;

/// Failure of a single lookup call. Never surfaced to the user; the
/// suggestion list is simply left as it was.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lookup service returned status {status}")]
    Status { status: reqwest::StatusCode },
}

/// Transport-level failure of a traversal call, i.e. the request never
/// produced a status to classify.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
