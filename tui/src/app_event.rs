//! Events delivered to the app loop from background tasks.

use wikilinks_core::LookupUpdate;
use wikilinks_core::Settlement;

/// Which of the two endpoint fields an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    From,
    To,
}

impl FieldId {
    pub fn label(self) -> &'static str {
        match self {
            FieldId::From => "From",
            FieldId::To => "To",
        }
    }

    pub fn other(self) -> FieldId {
        match self {
            FieldId::From => FieldId::To,
            FieldId::To => FieldId::From,
        }
    }
}

/// Events merged into the main loop alongside crossterm input.
#[derive(Debug)]
pub enum AppEvent {
    /// A lookup for one of the fields settled with a result. The update
    /// carries the sequence number of the dispatch that produced it so
    /// the app can drop stale completions.
    LookupUpdate { field: FieldId, update: LookupUpdate },

    /// A traversal request settled (with a classified outcome or, on
    /// transport failure, without one).
    SearchSettled(Settlement),

    /// Periodic timer used to animate the loading spinners.
    Tick,
}
