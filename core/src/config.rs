//! Remote service addresses.

/// Address both services are deployed at in production.
pub const DEFAULT_SERVICE_URL: &str = "http://159.89.230.173:3000";

/// The two remote service addresses the client talks to.
///
/// The lookup service and the traversal service are deployed behind the
/// same host in production, but the client keeps the two addresses
/// separate so either can be pointed elsewhere (tests point them at a
/// mock server).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL of the lookup service (`POST {search_url}/search`).
    pub search_url: String,
    /// Base URL of the traversal service (`POST {route_url}/bfs` and `/dfs`).
    pub route_url: String,
}

impl ServiceConfig {
    pub fn new(search_url: impl Into<String>, route_url: impl Into<String>) -> Self {
        Self {
            search_url: trim_base(search_url.into()),
            route_url: trim_base(route_url.into()),
        }
    }

    /// Both services behind a single base URL.
    pub fn single_host(base_url: impl Into<String>) -> Self {
        let base = trim_base(base_url.into());
        Self {
            search_url: base.clone(),
            route_url: base,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::single_host(DEFAULT_SERVICE_URL)
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}
