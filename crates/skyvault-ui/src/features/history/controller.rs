//! History loading and the optimistic bulk clear.

use async_trait::async_trait;
use crate::core::api::CloudApi;
use crate::core::load::{Notify, ScreenController, ScreenHandle};
use crate::features::history::state::HistoryState;
use skyvault_api_models::fallback;
use skyvault_api_models::paths::HISTORY_PAGE_LIMIT;
use std::rc::Rc;

/// Async operations behind the history screen.
#[derive(Clone)]
pub struct HistoryController {
    api: Rc<dyn CloudApi>,
    screen: ScreenHandle<HistoryState>,
}

impl HistoryController {
    /// Wire a controller to an API and a re-render hook.
    pub fn new(api: Rc<dyn CloudApi>, notify: Notify) -> Self {
        Self {
            api,
            screen: ScreenHandle::new(notify),
        }
    }

    /// Current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> HistoryState {
        self.screen.snapshot()
    }

    /// Clear every entry after `confirm` approves.
    ///
    /// On success the local list is emptied without a refetch. Returns whether
    /// the history was cleared.
    pub async fn clear(&self, confirm: impl FnOnce() -> bool) -> bool {
        let state = self.snapshot();
        if state.clearing || !state.shows_clear() || !confirm() {
            return false;
        }
        self.screen.update(|state| state.clearing = true);
        let outcome = self.api.clear_history().await;
        self.screen
            .update(|state| {
                state.clearing = false;
                match outcome {
                    Ok(ack) if ack.cleared => {
                        state.screen.finish(Ok(Vec::new()));
                        true
                    }
                    Ok(_) => {
                        state.screen.error = Some(fallback::CLEAR_HISTORY.to_string());
                        false
                    }
                    Err(err) => {
                        state.screen.error = Some(err.to_string());
                        false
                    }
                }
            })
            .unwrap_or(false)
    }
}

#[async_trait(?Send)]
impl ScreenController for HistoryController {
    /// Fetch the newest entries.
    async fn load(&self) {
        let ticket = self.screen.begin();
        self.screen.update(|state| state.screen.start());
        let outcome = self
            .api
            .history(HISTORY_PAGE_LIMIT)
            .await
            .map_err(|err| err.to_string());
        self.screen
            .commit(ticket, |state| state.screen.finish(outcome));
    }

    fn teardown(&self) {
        self.screen.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::load::silent;
    use crate::core::testing::{FakeApi, entry};
    use skyvault_api_models::{ApiError, ClearHistoryAck};

    fn controller() -> (Rc<FakeApi>, HistoryController) {
        let api = Rc::new(FakeApi::default());
        let controller = HistoryController::new(api.clone(), silent());
        (api, controller)
    }

    #[tokio::test]
    async fn loads_fifty_entries() {
        let (api, controller) = controller();
        api.push_history(Ok(vec![entry(1, "upload", "a.txt")]));

        controller.load().await;

        assert_eq!(api.count("history:50"), 1);
        assert_eq!(controller.snapshot().entries().len(), 1);
    }

    #[tokio::test]
    async fn failed_load_shows_only_the_error() {
        let (api, controller) = controller();
        api.push_history(Err(ApiError::Transport("offline".into())));

        controller.load().await;

        let state = controller.snapshot();
        assert!(!state.screen.loading);
        assert_eq!(state.screen.error.as_deref(), Some("offline"));
        assert!(!state.is_empty());
        assert!(!state.shows_clear());
    }

    #[tokio::test]
    async fn empty_history_hides_clear_and_sends_nothing() {
        let (api, controller) = controller();
        api.push_history(Ok(Vec::new()));
        controller.load().await;

        assert!(!controller.snapshot().shows_clear());
        assert!(!controller.clear(|| true).await);
        assert_eq!(api.count("clear_history"), 0);
    }

    #[tokio::test]
    async fn clear_empties_list_without_refetch() {
        let (api, controller) = controller();
        api.push_history(Ok(vec![entry(1, "upload", "a"), entry(2, "delete", "a")]));
        controller.load().await;

        assert!(controller.clear(|| true).await);

        let state = controller.snapshot();
        assert!(state.entries().is_empty());
        assert!(!state.clearing);
        assert_eq!(api.count("history"), 1);
        assert_eq!(api.count("clear_history"), 1);
    }

    #[tokio::test]
    async fn declined_clear_keeps_entries() {
        let (api, controller) = controller();
        api.push_history(Ok(vec![entry(1, "upload", "a")]));
        controller.load().await;

        assert!(!controller.clear(|| false).await);

        assert_eq!(api.count("clear_history"), 0);
        assert_eq!(controller.snapshot().entries().len(), 1);
    }

    #[tokio::test]
    async fn failed_clear_reports_error() {
        let (api, controller) = controller();
        api.push_history(Ok(vec![entry(1, "upload", "a")]));
        api.push_clear_history(Err(ApiError::Status {
            status: 500,
            message: "Failed to clear history".into(),
        }));
        controller.load().await;

        assert!(!controller.clear(|| true).await);

        let state = controller.snapshot();
        assert_eq!(state.screen.error.as_deref(), Some("Failed to clear history"));
        assert_eq!(state.entries().len(), 1);
    }

    #[tokio::test]
    async fn unacknowledged_clear_keeps_entries() {
        let (api, controller) = controller();
        api.push_history(Ok(vec![entry(1, "upload", "a")]));
        api.push_clear_history(Ok(ClearHistoryAck { cleared: false }));
        controller.load().await;

        assert!(!controller.clear(|| true).await);

        let state = controller.snapshot();
        assert_eq!(state.screen.error.as_deref(), Some(fallback::CLEAR_HISTORY));
        assert_eq!(state.entries().len(), 1);
    }
}
