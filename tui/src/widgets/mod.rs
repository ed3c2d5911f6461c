//! Composable widgets for the wikilinks TUI.

pub mod article_input;
pub mod path_results;
pub mod scroll_state;
pub mod suggestion_popup;

pub use article_input::ArticleInput;
pub use article_input::ArticleInputState;
pub use path_results::PathResults;
pub use scroll_state::ScrollState;
pub use suggestion_popup::SuggestionPopup;
