//! Abortable background work tied to the lifetime of its owner.
//!
//! # Design
//! - Every in-flight operation exposes exactly one cancellation handle.
//! - Dropping the handle aborts the future at its next await point, so a
//!   torn-down view can never observe a late completion.

use futures_util::future::{AbortHandle, Abortable, Aborted};
use std::future::Future;

/// Owning handle for a spawned task; aborts the task when dropped.
#[derive(Debug)]
pub struct TaskHandle {
    abort: AbortHandle,
}

impl TaskHandle {
    /// Stop the task without waiting for it.
    pub fn cancel(&self) {
        self.abort.abort();
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Wrap a future so it can be aborted through the returned handle.
///
/// The wrapped future resolves to `Err(Aborted)` once cancelled.
pub fn cancellable<F>(future: F) -> (TaskHandle, impl Future<Output = Result<F::Output, Aborted>>)
where
    F: Future,
{
    let (abort, registration) = AbortHandle::new_pair();
    (TaskHandle { abort }, Abortable::new(future, registration))
}

/// Spawn a future on the browser event loop and return its abort handle.
#[cfg(target_arch = "wasm32")]
pub fn spawn_cancellable<F>(future: F) -> TaskHandle
where
    F: Future<Output = ()> + 'static,
{
    let (handle, task) = cancellable(future);
    yew::platform::spawn_local(async move {
        let _ = task.await;
    });
    handle
}
