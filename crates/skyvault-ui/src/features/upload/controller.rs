//! Drives an [`UploadTask`] through an injected upload function.
//!
//! The controller sequences selection, transfer, and retry. It knows nothing
//! about timers or the DOM; the view ticks progress and schedules the close.

use crate::core::load::Notify;
use crate::features::upload::state::{UploadStatus, UploadTask};
use futures_util::future::LocalBoxFuture;
use std::cell::RefCell;
use std::rc::Rc;

/// Transport used to send one file. The error is the user-facing message.
pub struct UploadFn<F>(Rc<dyn Fn(F) -> LocalBoxFuture<'static, Result<(), String>>>);

impl<F> UploadFn<F> {
    /// Wrap an upload closure.
    pub fn new<C>(call: C) -> Self
    where
        C: Fn(F) -> LocalBoxFuture<'static, Result<(), String>> + 'static,
    {
        Self(Rc::new(call))
    }

    fn call(&self, file: F) -> LocalBoxFuture<'static, Result<(), String>> {
        (self.0)(file)
    }
}

impl<F> Clone for UploadFn<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<F> PartialEq for UploadFn<F> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared upload workflow handle.
pub struct UploadController<F> {
    task: Rc<RefCell<UploadTask<F>>>,
    upload: UploadFn<F>,
    notify: Notify,
}

impl<F> Clone for UploadController<F> {
    fn clone(&self) -> Self {
        Self {
            task: self.task.clone(),
            upload: self.upload.clone(),
            notify: self.notify.clone(),
        }
    }
}

impl<F: Clone + 'static> UploadController<F> {
    /// Build a controller around a fresh task.
    pub fn new(upload: UploadFn<F>, notify: Notify) -> Self {
        Self {
            task: Rc::new(RefCell::new(UploadTask::default())),
            upload,
            notify,
        }
    }

    /// Snapshot of the task for rendering.
    #[must_use]
    pub fn snapshot(&self) -> UploadTask<F> {
        self.task.borrow().clone()
    }

    /// Apply a synchronous state change and re-render.
    pub fn update<R>(&self, change: impl FnOnce(&mut UploadTask<F>) -> R) -> R {
        let result = change(&mut self.task.borrow_mut());
        (self.notify)();
        result
    }

    /// Choose files and send the first one.
    ///
    /// Returns the final status, or `None` when the selection was ignored.
    pub async fn choose(&self, files: Vec<F>) -> Option<UploadStatus> {
        let file = self.update(|task| {
            task.open();
            if task.select(files) { task.start() } else { None }
        })?;
        Some(self.send(file).await)
    }

    /// Re-send the file of a failed transfer.
    pub async fn retry(&self) -> Option<UploadStatus> {
        let file = self.update(UploadTask::retry)?;
        Some(self.send(file).await)
    }

    async fn send(&self, file: F) -> UploadStatus {
        let outcome = self.upload.call(file).await;
        self.update(|task| {
            match outcome {
                Ok(()) => task.complete(),
                Err(message) => task.fail(message),
            }
            task.status()
        })
    }
}
