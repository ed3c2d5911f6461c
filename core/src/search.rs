//! Path search coordination.
//!
//! The [`SearchCoordinator`] runs traversal requests: one strategy at a
//! time from the UI's point of view (the other strategy's trigger is
//! gated off while one is in flight), with outcomes classified from the
//! response status. Unlike lookups there is no cancellation here —
//! re-triggering the active strategy produces overlapping requests whose
//! settlements apply in arrival order, last arrival winning.

use std::sync::Arc;

use crate::client::PathClient;

/// The two remote traversal algorithms, each exposed as its own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    BreadthFirst,
    DepthFirst,
}

impl Strategy {
    /// Path segment of this strategy's endpoint.
    pub fn endpoint(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "bfs",
            Strategy::DepthFirst => "dfs",
        }
    }

    /// Human-readable trigger label.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "Breadth-First Search",
            Strategy::DepthFirst => "Depth-First Search",
        }
    }

}

/// Classified result of one traversal call that reached a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Success: the ordered names from start to end inclusive.
    Path(Vec<String>),
    /// 404: start or end name unknown to the service.
    EndpointNotFound,
    /// 418: the service's reserved "no path exists" status.
    NoPath,
    /// Any other status.
    Unknown,
}

/// User-facing failure classification, mutually exclusive with a
/// non-empty path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchError {
    #[default]
    None,
    EndpointNotFound,
    NoPath,
    Unknown,
}

impl SearchError {
    /// The exact message rendered for this error, if any.
    pub fn message(self) -> Option<&'static str> {
        match self {
            SearchError::None => None,
            SearchError::EndpointNotFound => Some("Start or end article not found"),
            SearchError::NoPath => Some("No path exists between articles"),
            SearchError::Unknown => Some("An unknown error occurred"),
        }
    }
}

/// One settled traversal call. `outcome` is `None` when the request
/// failed at the transport level before producing a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub strategy: Strategy,
    pub outcome: Option<RouteOutcome>,
}

/// Callback invoked from the dispatch task when a traversal settles.
pub type SettlementCallback = Arc<dyn Fn(Settlement) + Send + Sync>;

/// Coordinates traversal requests and owns the path/error state they
/// produce.
///
/// Settlements are routed back through [`SearchCoordinator::apply_settlement`]
/// in whatever order they arrive; the coordinator applies them in that
/// order and clears the active strategy on every settlement,
/// unconditionally.
pub struct SearchCoordinator {
    client: Arc<PathClient>,
    on_settled: SettlementCallback,
    active: Option<Strategy>,
    path: Vec<String>,
    error: SearchError,
}

impl SearchCoordinator {
    pub fn new(client: Arc<PathClient>, on_settled: SettlementCallback) -> Self {
        Self {
            client,
            on_settled,
            active: None,
            path: Vec::new(),
            error: SearchError::None,
        }
    }

    /// Which strategy currently has an outstanding request, if any.
    pub fn active(&self) -> Option<Strategy> {
        self.active
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn error(&self) -> SearchError {
        self.error
    }

    /// Whether triggering `strategy` must be rejected because the other
    /// strategy is awaiting a response. The active strategy itself stays
    /// re-triggerable.
    pub fn is_blocked(&self, strategy: Strategy) -> bool {
        self.active.is_some_and(|active| active != strategy)
    }

    /// Dispatch a traversal request, reading both endpoint texts at this
    /// moment — later edits to the fields do not affect the in-flight
    /// request. Returns `false` without dispatching when `strategy` is
    /// blocked by the other strategy's outstanding request.
    pub fn start(&mut self, strategy: Strategy, start: &str, end: &str) -> bool {
        if self.is_blocked(strategy) {
            return false;
        }

        self.active = Some(strategy);

        let client = Arc::clone(&self.client);
        let on_settled = Arc::clone(&self.on_settled);
        let start = start.to_string();
        let end = end.to_string();
        tokio::spawn(async move {
            let outcome = match client.find_path(strategy, &start, &end).await {
                Ok(outcome) => Some(outcome),
                Err(error) => {
                    tracing::warn!("route request failed: {error}");
                    None
                }
            };
            on_settled(Settlement { strategy, outcome });
        });

        true
    }

    /// Apply one settlement in arrival order.
    ///
    /// The active strategy is cleared whatever the outcome — including a
    /// transport failure, and including the case where an overlapping
    /// request for the same strategy is still in flight. A transport
    /// failure leaves the previous path/error untouched; the stale state
    /// stays on screen until the user re-triggers.
    pub fn apply_settlement(&mut self, settlement: Settlement) {
        self.active = None;

        match settlement.outcome {
            None => {}
            Some(RouteOutcome::Path(names)) => {
                self.path = names;
                self.error = SearchError::None;
            }
            Some(RouteOutcome::EndpointNotFound) => {
                self.path.clear();
                self.error = SearchError::EndpointNotFound;
            }
            Some(RouteOutcome::NoPath) => {
                self.path.clear();
                self.error = SearchError::NoPath;
            }
            Some(RouteOutcome::Unknown) => {
                self.path.clear();
                self.error = SearchError::Unknown;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn coordinator() -> SearchCoordinator {
        let client = Arc::new(PathClient::new(crate::ServiceConfig::default()));
        SearchCoordinator::new(client, Arc::new(|_| {}))
    }

    #[test]
    fn messages_are_exact() {
        assert_eq!(
            SearchError::EndpointNotFound.message(),
            Some("Start or end article not found")
        );
        assert_eq!(
            SearchError::NoPath.message(),
            Some("No path exists between articles")
        );
        assert_eq!(SearchError::Unknown.message(), Some("An unknown error occurred"));
        assert_eq!(SearchError::None.message(), None);
    }

    #[test]
    fn settlement_clears_active_even_on_transport_failure() {
        let mut coordinator = coordinator();
        coordinator.active = Some(Strategy::BreadthFirst);
        coordinator.path = vec!["A".to_string(), "B".to_string()];

        coordinator.apply_settlement(Settlement {
            strategy: Strategy::BreadthFirst,
            outcome: None,
        });

        assert_eq!(coordinator.active(), None);
        // Stale result persists on a transport failure.
        assert_eq!(coordinator.path(), ["A", "B"]);
        assert_eq!(coordinator.error(), SearchError::None);
    }

    #[test]
    fn classified_failure_clears_path() {
        let mut coordinator = coordinator();
        coordinator.path = vec!["A".to_string()];

        coordinator.apply_settlement(Settlement {
            strategy: Strategy::DepthFirst,
            outcome: Some(RouteOutcome::NoPath),
        });

        assert!(coordinator.path().is_empty());
        assert_eq!(coordinator.error(), SearchError::NoPath);
    }

    #[test]
    fn success_clears_previous_error() {
        let mut coordinator = coordinator();
        coordinator.error = SearchError::Unknown;

        coordinator.apply_settlement(Settlement {
            strategy: Strategy::BreadthFirst,
            outcome: Some(RouteOutcome::Path(vec!["A".to_string(), "B".to_string()])),
        });

        assert_eq!(coordinator.path(), ["A", "B"]);
        assert_eq!(coordinator.error(), SearchError::None);
    }

    #[test]
    fn settlements_apply_in_arrival_order() {
        let mut coordinator = coordinator();

        coordinator.apply_settlement(Settlement {
            strategy: Strategy::BreadthFirst,
            outcome: Some(RouteOutcome::EndpointNotFound),
        });
        coordinator.apply_settlement(Settlement {
            strategy: Strategy::BreadthFirst,
            outcome: Some(RouteOutcome::Path(vec!["A".to_string()])),
        });

        // Last arrival wins, not first dispatch.
        assert_eq!(coordinator.path(), ["A"]);
        assert_eq!(coordinator.error(), SearchError::None);
    }

    #[test]
    fn other_strategy_is_blocked_while_one_is_active() {
        let mut coordinator = coordinator();
        coordinator.active = Some(Strategy::BreadthFirst);

        assert!(coordinator.is_blocked(Strategy::DepthFirst));
        assert!(!coordinator.is_blocked(Strategy::BreadthFirst));
    }
}
