//! Activity history screen state.

use crate::core::load::ScreenState;
use skyvault_api_models::HistoryEntry;

/// Confirmation prompt shown before clearing.
pub const CLEAR_PROMPT: &str = "Clear all history?";
/// Shown when there is no activity.
pub const EMPTY_MESSAGE: &str = "No activity yet.";

/// Everything the history screen renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryState {
    /// Load status and the fetched entries.
    pub screen: ScreenState<Vec<HistoryEntry>>,
    /// A clear request is in flight.
    pub clearing: bool,
}

impl HistoryState {
    /// Entries from the latest load, or none after a clear.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        self.screen.data.as_deref().unwrap_or_default()
    }

    /// Whether the clear action is offered at all.
    #[must_use]
    pub fn shows_clear(&self) -> bool {
        !self.entries().is_empty()
    }

    /// Whether the no-activity message applies; an error takes its place.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.screen.loading && self.screen.error.is_none() && self.entries().is_empty()
    }

    /// Label for the clear button.
    #[must_use]
    pub const fn clear_label(&self) -> &'static str {
        if self.clearing {
            "Clearing…"
        } else {
            "Clear History"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::entry;

    #[test]
    fn clear_hidden_without_entries() {
        let mut state = HistoryState::default();
        state.screen.finish(Ok(Vec::new()));
        assert!(!state.shows_clear());
        state.screen.finish(Ok(vec![entry(1, "delete", "a")]));
        assert!(state.shows_clear());
    }

    #[test]
    fn failed_load_is_not_empty() {
        let mut state = HistoryState::default();
        assert!(!state.is_empty());
        state.screen.finish(Err("offline".into()));
        assert!(!state.is_empty());
        state.screen.finish(Ok(Vec::new()));
        assert!(state.is_empty());
    }

    #[test]
    fn busy_label_while_clearing() {
        let state = HistoryState {
            clearing: true,
            ..HistoryState::default()
        };
        assert_eq!(state.clear_label(), "Clearing…");
    }
}
