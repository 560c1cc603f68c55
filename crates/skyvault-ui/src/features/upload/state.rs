//! Upload workflow state machine.
//!
//! # Design
//! - The phase enum owns the selected file, so "uploading without a file" and
//!   "two uploads at once" cannot be expressed.
//! - Starting an upload consumes the selection: [`UploadTask::start`] yields
//!   the file exactly once, and the caller performs the transfer with it.
//! - Progress is synthetic. Ticks advance it toward [`PROGRESS_CAP`] and only
//!   a resolved upload moves it to 100.
//! - Drag highlighting lives beside the phase and never changes it.

/// Progress added on every tick while uploading.
pub const PROGRESS_STEP: u8 = 12;
/// Progress ceiling until the upload call resolves.
pub const PROGRESS_CAP: u8 = 90;
/// Tick period for the synthetic progress indicator.
pub const TICK_MS: u32 = 150;
/// How long the success banner stays up before the modal closes.
pub const SUCCESS_DELAY_MS: u32 = 800;
/// Shown when a drop carries more than one file.
pub const MULTI_FILE_NOTICE: &str = "Only the first file will be uploaded.";

/// Where the workflow currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UploadPhase<F> {
    /// Modal closed, nothing selected.
    #[default]
    Idle,
    /// Modal open; a file may have been chosen but the transfer has not begun.
    Selecting {
        /// The chosen file, if any.
        file: Option<F>,
    },
    /// Transfer in flight.
    Uploading {
        /// File being sent.
        file: F,
        /// Synthetic progress, `0..=PROGRESS_CAP`.
        progress: u8,
    },
    /// Transfer finished; waiting out the success banner.
    Succeeded {
        /// File that was sent.
        file: F,
    },
    /// Transfer failed; the file is kept for a retry.
    Failed {
        /// File to retry with.
        file: F,
        /// Progress at the moment of failure.
        progress: u8,
        /// Message surfaced to the user.
        message: String,
    },
}

/// Coarse status for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStatus {
    /// Nothing in flight.
    Idle,
    /// Transfer in flight.
    Uploading,
    /// Transfer succeeded.
    Success,
    /// Transfer failed.
    Error,
}

/// One upload modal's worth of state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTask<F> {
    phase: UploadPhase<F>,
    dragging: bool,
    notice: Option<String>,
}

impl<F> Default for UploadTask<F> {
    fn default() -> Self {
        Self {
            phase: UploadPhase::Idle,
            dragging: false,
            notice: None,
        }
    }
}

impl<F: Clone> UploadTask<F> {
    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &UploadPhase<F> {
        &self.phase
    }

    /// Whether the modal is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self.phase, UploadPhase::Idle)
    }

    /// Whether a transfer is in flight.
    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        matches!(self.phase, UploadPhase::Uploading { .. })
    }

    /// Rendering status.
    #[must_use]
    pub const fn status(&self) -> UploadStatus {
        match self.phase {
            UploadPhase::Idle | UploadPhase::Selecting { .. } => UploadStatus::Idle,
            UploadPhase::Uploading { .. } => UploadStatus::Uploading,
            UploadPhase::Succeeded { .. } => UploadStatus::Success,
            UploadPhase::Failed { .. } => UploadStatus::Error,
        }
    }

    /// Selected file in any phase that has one.
    #[must_use]
    pub const fn file(&self) -> Option<&F> {
        match &self.phase {
            UploadPhase::Idle | UploadPhase::Selecting { file: None } => None,
            UploadPhase::Selecting { file: Some(file) }
            | UploadPhase::Uploading { file, .. }
            | UploadPhase::Succeeded { file }
            | UploadPhase::Failed { file, .. } => Some(file),
        }
    }

    /// Progress bar value.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        match self.phase {
            UploadPhase::Idle | UploadPhase::Selecting { .. } => 0,
            UploadPhase::Uploading { progress, .. } | UploadPhase::Failed { progress, .. } => {
                progress
            }
            UploadPhase::Succeeded { .. } => 100,
        }
    }

    /// Failure message, if the last transfer failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            UploadPhase::Failed { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Non-fatal notice, such as the multi-file warning.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether a drag is hovering over the drop zone.
    #[must_use]
    pub const fn dragging(&self) -> bool {
        self.dragging
    }

    /// Toggle the drag highlight.
    pub const fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Open the modal with nothing selected.
    pub fn open(&mut self) {
        if matches!(self.phase, UploadPhase::Idle) {
            self.phase = UploadPhase::Selecting { file: None };
            self.notice = None;
        }
    }

    /// Choose files from the picker or a drop; only the first is kept.
    ///
    /// Returns `false` when the choice was ignored (nothing chosen, or a
    /// transfer is already running or finishing).
    pub fn select(&mut self, files: Vec<F>) -> bool {
        if matches!(
            self.phase,
            UploadPhase::Uploading { .. } | UploadPhase::Succeeded { .. }
        ) {
            return false;
        }
        let extra = files.len() > 1;
        let Some(first) = files.into_iter().next() else {
            return false;
        };
        self.dragging = false;
        self.notice = extra.then(|| MULTI_FILE_NOTICE.to_string());
        self.phase = UploadPhase::Selecting { file: Some(first) };
        true
    }

    /// Begin the transfer for the current selection.
    ///
    /// Yields the file to send exactly once per selection; every later call
    /// returns `None` until a new file is chosen or a retry is requested.
    pub fn start(&mut self) -> Option<F> {
        let UploadPhase::Selecting { file: Some(file) } = &self.phase else {
            return None;
        };
        let file = file.clone();
        self.phase = UploadPhase::Uploading {
            file: file.clone(),
            progress: 0,
        };
        Some(file)
    }

    /// Advance synthetic progress; returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        let UploadPhase::Uploading { progress, .. } = &mut self.phase else {
            return false;
        };
        let next = progress.saturating_add(PROGRESS_STEP).min(PROGRESS_CAP);
        let changed = next != *progress;
        *progress = next;
        changed
    }

    /// The transfer succeeded.
    pub fn complete(&mut self) {
        if let UploadPhase::Uploading { file, .. } = &self.phase {
            self.phase = UploadPhase::Succeeded { file: file.clone() };
        }
    }

    /// The transfer failed; progress freezes where it was.
    pub fn fail(&mut self, message: impl Into<String>) {
        if let UploadPhase::Uploading { file, progress } = &self.phase {
            self.phase = UploadPhase::Failed {
                file: file.clone(),
                progress: *progress,
                message: message.into(),
            };
        }
    }

    /// Re-send the file of a failed transfer.
    pub fn retry(&mut self) -> Option<F> {
        let UploadPhase::Failed { file, .. } = &self.phase else {
            return None;
        };
        let file = file.clone();
        self.notice = None;
        self.phase = UploadPhase::Uploading {
            file: file.clone(),
            progress: 0,
        };
        Some(file)
    }

    /// Discard the selection and close; ignored while uploading.
    pub fn cancel(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.reset();
        true
    }

    /// Close after the success banner has been shown.
    pub fn finish(&mut self) -> bool {
        if !matches!(self.phase, UploadPhase::Succeeded { .. }) {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.phase = UploadPhase::Idle;
        self.dragging = false;
        self.notice = None;
    }
}
