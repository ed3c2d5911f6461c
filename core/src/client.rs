//! HTTP client for the lookup and traversal services.
//!
//! Both services speak newline-delimited plain text: the lookup endpoint
//! takes a `%`-wrapped wildcard pattern and returns candidate names, the
//! traversal endpoints take the two endpoint names joined by a newline
//! and answer with either the path or one of two reserved failure
//! statuses (404 for unknown endpoints, 418 for "no path").

use reqwest::StatusCode;

use crate::config::ServiceConfig;
use crate::error::LookupError;
use crate::error::RouteError;
use crate::search::RouteOutcome;
use crate::search::Strategy;

/// Marker character wrapped around lookup text so the remote service
/// performs substring matching.
pub const WILDCARD_MARKER: char = '%';

/// Client for the remote lookup and traversal services.
#[derive(Debug, Clone)]
pub struct PathClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl PathClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Look up candidate names matching `text` as a substring.
    ///
    /// The request body wraps the text as `%text%`; empty text is sent
    /// as `%%` and the server decides what an empty wildcard means. Any
    /// non-success status is reported as a failure; callers treat those
    /// the same as transport faults (logged, nothing applied).
    pub async fn lookup(&self, text: &str) -> Result<Vec<String>, LookupError> {
        let body = format!("{WILDCARD_MARKER}{text}{WILDCARD_MARKER}");
        let response = self
            .http
            .post(format!("{}/search", self.config.search_url))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status { status });
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Ok(Vec::new());
        }
        Ok(split_names(&body))
    }

    /// Request a path from `start` to `end` with the given strategy and
    /// classify the response status.
    ///
    /// Classification happens in priority order: 404, then the reserved
    /// 418 "no path" status, then any success, then everything else.
    /// Only transport faults (no status at all) surface as `Err`.
    pub async fn find_path(
        &self,
        strategy: Strategy,
        start: &str,
        end: &str,
    ) -> Result<RouteOutcome, RouteError> {
        let body = format!("{start}\n{end}");
        let response = self
            .http
            .post(format!("{}/{}", self.config.route_url, strategy.endpoint()))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            Ok(RouteOutcome::EndpointNotFound)
        } else if status == StatusCode::IM_A_TEAPOT {
            Ok(RouteOutcome::NoPath)
        } else if status.is_success() {
            let body = response.text().await?;
            Ok(RouteOutcome::Path(split_names(&body)))
        } else {
            tracing::warn!("unexpected status from {} route: {status}", strategy.endpoint());
            Ok(RouteOutcome::Unknown)
        }
    }
}

/// Split a newline-delimited response body into names.
///
/// An empty body yields a single empty name; lookup callers special-case
/// the empty body before calling this, route callers render it as-is.
fn split_names(body: &str) -> Vec<String> {
    body.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn split_names_preserves_order() {
        assert_eq!(split_names("A\nB\nC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn split_names_on_empty_body_is_one_empty_name() {
        assert_eq!(split_names(""), vec![String::new()]);
    }
}
