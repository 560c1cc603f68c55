//! Admin overview fetch.

use async_trait::async_trait;
use crate::core::api::CloudApi;
use crate::core::load::{Notify, ScreenController, ScreenHandle};
use crate::features::admin::state::{AdminData, AdminState};
use futures_util::future::try_join;
use std::rc::Rc;

/// Loads admin counters and the user list together.
#[derive(Clone)]
pub struct AdminController {
    api: Rc<dyn CloudApi>,
    screen: ScreenHandle<AdminState>,
}

impl AdminController {
    /// Wire a controller to an API and a re-render hook.
    pub fn new(api: Rc<dyn CloudApi>, notify: Notify) -> Self {
        Self {
            api,
            screen: ScreenHandle::new(notify),
        }
    }

    /// Current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> AdminState {
        self.screen.snapshot()
    }
}

#[async_trait(?Send)]
impl ScreenController for AdminController {
    /// Fetch both resources. A refusal from the backend surfaces as the error.
    async fn load(&self) {
        let ticket = self.screen.begin();
        self.screen.update(AdminState::start);
        let outcome = try_join(self.api.admin_stats(), self.api.admin_users())
            .await
            .map(|(stats, users)| AdminData { stats, users })
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
    use crate::core::testing::FakeApi;
    use skyvault_api_models::{ApiError, AdminStats, fallback};

    #[tokio::test]
    async fn forbidden_surfaces_backend_message() {
        let api = Rc::new(FakeApi::default());
        api.push_admin_stats(Err(ApiError::from_response(
            403,
            br#"{"detail":"Admin privileges required"}"#,
            fallback::ADMIN_STATS,
        )));
        let controller = AdminController::new(api, silent());

        controller.load().await;

        let state = controller.snapshot();
        assert_eq!(state.error.as_deref(), Some("Admin privileges required"));
        assert!(state.data.is_none());
    }

    #[tokio::test]
    async fn empty_refusal_uses_fallback() {
        let api = Rc::new(FakeApi::default());
        api.push_admin_stats(Err(ApiError::from_response(403, b"", fallback::ADMIN_STATS)));
        let controller = AdminController::new(api, silent());

        controller.load().await;

        assert_eq!(
            controller.snapshot().error.as_deref(),
            Some("Admin access required")
        );
    }

    #[tokio::test]
    async fn success_carries_stats_and_users() {
        let api = Rc::new(FakeApi::default());
        api.push_admin_stats(Ok(AdminStats {
            total_users: 2,
            total_files: 5,
            total_storage_bytes: None,
            total_storage_mb: 1.5,
            recent_activities: 9,
        }));
        let controller = AdminController::new(api, silent());

        controller.load().await;

        let data = controller.snapshot().data.expect("loaded");
        assert_eq!(data.stats.total_users, 2);
        assert!(data.users.is_empty());
    }
}
