//! Dashboard fetch and retry.

use async_trait::async_trait;
use crate::core::api::CloudApi;
use crate::core::load::{Notify, ScreenController, ScreenHandle};
use crate::features::dashboard::state::{DashboardData, DashboardState};
use futures_util::future::try_join3;
use skyvault_api_models::paths::DASHBOARD_HISTORY_LIMIT;
use std::rc::Rc;

/// Loads storage, files, and recent history together.
#[derive(Clone)]
pub struct DashboardController {
    api: Rc<dyn CloudApi>,
    screen: ScreenHandle<DashboardState>,
}

impl DashboardController {
    /// Wire a controller to an API and a re-render hook.
    pub fn new(api: Rc<dyn CloudApi>, notify: Notify) -> Self {
        Self {
            api,
            screen: ScreenHandle::new(notify),
        }
    }

    /// Current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> DashboardState {
        self.screen.snapshot()
    }
}

#[async_trait(?Send)]
impl ScreenController for DashboardController {
    /// Fetch all three resources; any failure fails the whole load.
    ///
    /// Also serves as the retry action.
    async fn load(&self) {
        let ticket = self.screen.begin();
        self.screen.update(DashboardState::start);
        let outcome = try_join3(
            self.api.storage(),
            self.api.list_files(),
            self.api.history(DASHBOARD_HISTORY_LIMIT),
        )
        .await
        .map(|(storage, files, history)| DashboardData {
            storage,
            files,
            history,
        })
        .map_err(|err| err.to_string());
        self.screen.commit(ticket, |state| state.finish(outcome));
    }

    fn teardown(&self) {
        self.screen.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::load::silent;
    use crate::core::testing::{FakeApi, entry, file};
    use skyvault_api_models::{ApiError, StorageSummary};

    #[tokio::test]
    async fn combined_fetch_populates_everything() {
        let api = Rc::new(FakeApi::default());
        api.push_storage(Ok(StorageSummary {
            total_bytes: 2048,
            total_mb: 0.0,
        }));
        api.push_files(Ok(vec![file(1, "a.txt", "2024-01-01T00:00:00")]));
        api.push_history(Ok(vec![entry(1, "upload", "a.txt")]));
        let controller = DashboardController::new(api.clone(), silent());

        controller.load().await;

        let state = controller.snapshot();
        let data = state.data.expect("loaded");
        assert_eq!(data.storage.total_bytes, 2048);
        assert_eq!(data.files.len(), 1);
        assert_eq!(data.history.len(), 1);
        assert_eq!(api.count("history:10"), 1);
    }

    #[tokio::test]
    async fn one_failure_fails_the_load_and_retry_refetches_all() {
        let api = Rc::new(FakeApi::default());
        api.push_files(Err(ApiError::Transport("offline".into())));
        let controller = DashboardController::new(api.clone(), silent());

        controller.load().await;
        let state = controller.snapshot();
        assert_eq!(state.error.as_deref(), Some("offline"));
        assert!(state.data.is_none());

        controller.load().await;
        let state = controller.snapshot();
        assert!(state.error.is_none());
        assert!(state.data.is_some());
        assert_eq!(api.count("storage"), 2);
        assert_eq!(api.count("list_files"), 2);
    }
}
