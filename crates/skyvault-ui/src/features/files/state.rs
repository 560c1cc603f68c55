//! File list screen state.
//!
//! # Design
//! - Busy flags are per row and per action so one row's download never blocks
//!   another row, and a row can download while it is being deleted.
//! - Action failures are reported beside the list; load failures replace it.

use crate::core::load::ScreenState;
use skyvault_api_models::FileRecord;
use std::collections::BTreeSet;

/// Confirmation prompt shown before a delete.
pub const DELETE_PROMPT: &str = "Delete this file?";
/// Shown when the user has no files.
pub const EMPTY_MESSAGE: &str = "No files yet. Upload one to get started.";
/// Hint rendered inside the page drop zone.
pub const DROP_HINT: &str = "Drag and drop a file here, or use the Upload button above.";

/// Everything the file screen renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilesState {
    /// Load status and the fetched list.
    pub screen: ScreenState<Vec<FileRecord>>,
    /// Rows with a download in flight.
    pub downloading: BTreeSet<i64>,
    /// Rows with a delete in flight.
    pub deleting: BTreeSet<i64>,
    /// Last download or delete failure.
    pub action_error: Option<String>,
}

impl FilesState {
    /// Files from the latest successful load.
    #[must_use]
    pub fn files(&self) -> &[FileRecord] {
        self.screen.data.as_deref().unwrap_or_default()
    }

    /// Whether `id` is downloading.
    #[must_use]
    pub fn is_downloading(&self, id: i64) -> bool {
        self.downloading.contains(&id)
    }

    /// Whether `id` is being deleted.
    #[must_use]
    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(&id)
    }

    /// Full-page spinner: first load with nothing to show yet.
    #[must_use]
    pub fn shows_spinner(&self) -> bool {
        self.screen.loading && self.files().is_empty()
    }

    /// Whether the empty-list message applies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.screen.loading && self.screen.error.is_none() && self.files().is_empty()
    }
}
