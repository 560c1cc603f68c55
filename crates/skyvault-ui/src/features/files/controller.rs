//! File list loading, download, and delete.

use async_trait::async_trait;
use crate::core::api::{CloudApi, DownloadedFile};
use crate::core::load::{Notify, ScreenController, ScreenHandle};
use crate::features::files::state::FilesState;
use std::rc::Rc;

/// Async operations behind the file screen.
#[derive(Clone)]
pub struct FilesController {
    api: Rc<dyn CloudApi>,
    screen: ScreenHandle<FilesState>,
}

impl FilesController {
    /// Wire a controller to an API and a re-render hook.
    pub fn new(api: Rc<dyn CloudApi>, notify: Notify) -> Self {
        Self {
            api,
            screen: ScreenHandle::new(notify),
        }
    }

    /// Current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> FilesState {
        self.screen.snapshot()
    }

    /// Fetch a file's content; ignored while the same row is downloading.
    pub async fn download(&self, id: i64) -> Option<DownloadedFile> {
        let started = self.screen.update(|state| {
            state.action_error = None;
            state.downloading.insert(id)
        })?;
        if !started {
            return None;
        }
        let outcome = self.api.download_file(id).await;
        self.screen.update(|state| {
            state.downloading.remove(&id);
            match outcome {
                Ok(file) => Some(file),
                Err(err) => {
                    state.action_error = Some(err.to_string());
                    None
                }
            }
        })?
    }

    /// Delete a file after `confirm` approves, then reload the list once.
    ///
    /// Returns whether the file was deleted.
    pub async fn delete(&self, id: i64, confirm: impl FnOnce() -> bool) -> bool {
        if self.snapshot().is_deleting(id) || !confirm() {
            return false;
        }
        let started = self.screen.update(|state| {
            state.action_error = None;
            state.deleting.insert(id)
        });
        if started != Some(true) {
            return false;
        }
        let outcome = self.api.delete_file(id).await;
        let deleted = self
            .screen
            .update(|state| {
                state.deleting.remove(&id);
                match outcome {
                    Ok(()) => true,
                    Err(err) => {
                        state.action_error = Some(err.to_string());
                        false
                    }
                }
            })
            .unwrap_or(false);
        if deleted {
            self.load().await;
        }
        deleted
    }
}

#[async_trait(?Send)]
impl ScreenController for FilesController {
    /// Fetch the list; only the newest load's result is kept.
    async fn load(&self) {
        let ticket = self.screen.begin();
        self.screen.update(|state| state.screen.start());
        let outcome = self.api.list_files().await.map_err(|err| err.to_string());
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
    use crate::core::testing::{FakeApi, file};
    use skyvault_api_models::ApiError;

    fn controller() -> (Rc<FakeApi>, FilesController) {
        let api = Rc::new(FakeApi::default());
        let controller = FilesController::new(api.clone(), silent());
        (api, controller)
    }

    #[tokio::test]
    async fn latest_load_wins_when_earlier_resolves_late() {
        let (api, controller) = controller();
        let slow = api.gate_files();
        api.push_files(Ok(vec![file(2, "new.txt", "2024-02-01T00:00:00")]));

        let first = controller.load();
        let second = async {
            tokio::task::yield_now().await;
            controller.load().await;
            let _ = slow.send(Ok(vec![file(1, "old.txt", "2024-01-01T00:00:00")]));
        };
        tokio::join!(first, second);

        let state = controller.snapshot();
        assert_eq!(state.files().len(), 1);
        assert_eq!(state.files()[0].original_filename, "new.txt");
        assert!(!state.screen.loading);
    }

    #[tokio::test]
    async fn load_failure_is_reported() {
        let (api, controller) = controller();
        api.push_files(Err(ApiError::Status {
            status: 500,
            message: "Failed to fetch files".into(),
        }));

        controller.load().await;

        let state = controller.snapshot();
        assert_eq!(state.screen.error.as_deref(), Some("Failed to fetch files"));
        assert!(!state.is_empty());
    }

    #[tokio::test]
    async fn unconfirmed_delete_sends_nothing() {
        let (api, controller) = controller();

        assert!(!controller.delete(7, || false).await);

        assert_eq!(api.count("delete"), 0);
        assert_eq!(api.count("list_files"), 0);
    }

    #[tokio::test]
    async fn confirmed_delete_reloads_exactly_once() {
        let (api, controller) = controller();
        api.push_files(Ok(Vec::new()));

        assert!(controller.delete(7, || true).await);

        assert_eq!(api.calls(), vec!["delete:7", "list_files"]);
        assert!(!controller.snapshot().is_deleting(7));
    }

    #[tokio::test]
    async fn failed_delete_keeps_list_and_reports() {
        let (api, controller) = controller();
        api.push_delete(Err(ApiError::Status {
            status: 404,
            message: "File not found".into(),
        }));

        assert!(!controller.delete(3, || true).await);

        assert_eq!(api.count("list_files"), 0);
        assert_eq!(
            controller.snapshot().action_error.as_deref(),
            Some("File not found")
        );
    }

    #[tokio::test]
    async fn download_is_single_flight_per_row() {
        let (api, controller) = controller();
        let gate = api.gate_download();
        api.push_download(Ok(DownloadedFile {
            filename: "b.txt".into(),
            content_type: None,
            bytes: b"b".to_vec(),
        }));

        let first = controller.download(1);
        let others = async {
            tokio::task::yield_now().await;
            let duplicate = controller.download(1).await;
            let other_row = controller.download(2).await;
            let _ = gate.send(Ok(DownloadedFile {
                filename: "a.txt".into(),
                content_type: Some("text/plain".into()),
                bytes: b"a".to_vec(),
            }));
            (duplicate, other_row)
        };
        let (first, (duplicate, other_row)) = tokio::join!(first, others);

        assert_eq!(first.map(|file| file.filename), Some("a.txt".to_string()));
        assert!(duplicate.is_none());
        assert_eq!(other_row.map(|file| file.filename), Some("b.txt".to_string()));
        assert_eq!(api.count("download:1"), 1);
        assert!(controller.snapshot().downloading.is_empty());
    }

    #[tokio::test]
    async fn teardown_discards_late_results() {
        let (api, controller) = controller();
        let gate = api.gate_files();

        let load = controller.load();
        let unmount = async {
            tokio::task::yield_now().await;
            controller.teardown();
            let _ = gate.send(Ok(vec![file(1, "late.txt", "2024-01-01T00:00:00")]));
        };
        tokio::join!(load, unmount);

        assert!(controller.snapshot().files().is_empty());
    }
}
