//! Screen-local load bookkeeping.
//!
//! # Design
//! - Each load takes a [`LoadTicket`]; only the newest ticket may commit.
//! - Teardown invalidates every outstanding ticket at once, so results that
//!   arrive after a view unmounts are dropped instead of applied.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Re-render hook handed to controllers by their view.
pub type Notify = Rc<dyn Fn()>;

/// A no-op [`Notify`], handy for tests and detached controllers.
#[must_use]
pub fn silent() -> Notify {
    Rc::new(|| {})
}

/// Monotonic generation counter shared by a screen's loads.
#[derive(Clone, Debug, Default)]
pub struct LoadGeneration {
    current: Rc<Cell<u64>>,
    torn_down: Rc<Cell<bool>>,
}

/// Proof that a load was started at a particular generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadGeneration {
    /// Start a new load, superseding every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        LoadTicket(next)
    }

    /// Whether results for `ticket` may still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        !self.torn_down.get() && self.current.get() == ticket.0
    }

    /// Mark the owning view as gone.
    pub fn teardown(&self) {
        self.torn_down.set(true);
    }

    /// Whether the owning view is still mounted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.torn_down.get()
    }
}

/// Loading, error, and data triple every data screen renders from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenState<T> {
    /// A load is in flight.
    pub loading: bool,
    /// Message from the most recent failed load.
    pub error: Option<String>,
    /// Data from the most recent successful load.
    pub data: Option<T>,
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            data: None,
        }
    }
}

impl<T> ScreenState<T> {
    /// Enter the loading state, keeping previously loaded data.
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Commit a load outcome.
    pub fn finish(&mut self, outcome: Result<T, String>) {
        self.loading = false;
        match outcome {
            Ok(data) => {
                self.error = None;
                self.data = Some(data);
            }
            Err(message) => self.error = Some(message),
        }
    }
}

/// Screen state shared between a view and its async work.
///
/// Every mutation re-renders through the view's [`Notify`]. Mutations that
/// arrive after teardown, or for a superseded load, are dropped.
pub struct ScreenHandle<S> {
    state: Rc<RefCell<S>>,
    generation: LoadGeneration,
    notify: Notify,
}

impl<S> Clone for ScreenHandle<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            generation: self.generation.clone(),
            notify: self.notify.clone(),
        }
    }
}

impl<S: Clone + Default> ScreenHandle<S> {
    /// Fresh state wired to `notify`.
    #[must_use]
    pub fn new(notify: Notify) -> Self {
        Self {
            state: Rc::new(RefCell::new(S::default())),
            generation: LoadGeneration::default(),
            notify,
        }
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    /// Start a load that supersedes every earlier one.
    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        self.generation.begin()
    }

    /// Mutate and re-render if the view is still mounted.
    pub fn update<R>(&self, change: impl FnOnce(&mut S) -> R) -> Option<R> {
        if !self.generation.is_live() {
            return None;
        }
        let result = change(&mut self.state.borrow_mut());
        (self.notify)();
        Some(result)
    }

    /// Mutate and re-render only if `ticket` is still the newest load.
    pub fn commit<R>(&self, ticket: LoadTicket, change: impl FnOnce(&mut S) -> R) -> Option<R> {
        if !self.generation.is_current(ticket) {
            return None;
        }
        self.update(change)
    }

    /// Stop applying results; called when the view unmounts.
    pub fn teardown(&self) {
        self.generation.teardown();
    }
}

/// Lifecycle a mounted data screen drives on its controller.
#[async_trait(?Send)]
pub trait ScreenController: Clone + 'static {
    /// Fetch the screen's data, superseding any load still in flight.
    async fn load(&self);

    /// Stop applying results; called when the view unmounts.
    fn teardown(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    async fn load_into(
        generation: &LoadGeneration,
        ticket: LoadTicket,
        rx: oneshot::Receiver<&'static str>,
        target: &RefCell<Vec<&'static str>>,
    ) {
        let value = rx.await.unwrap_or("dropped");
        if generation.is_current(ticket) {
            target.borrow_mut().push(value);
        }
    }

    #[tokio::test]
    async fn older_load_resolving_last_is_discarded() {
        let generation = LoadGeneration::default();
        let applied = RefCell::new(Vec::new());
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();

        let first = load_into(&generation, generation.begin(), first_rx, &applied);
        let second = load_into(&generation, generation.begin(), second_rx, &applied);
        let _ = second_tx.send("second");
        let _ = first_tx.send("first");
        tokio::join!(first, second);

        assert_eq!(*applied.borrow(), vec!["second"]);
    }

    #[tokio::test]
    async fn older_load_resolving_first_is_discarded() {
        let generation = LoadGeneration::default();
        let applied = RefCell::new(Vec::new());
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();

        let first = load_into(&generation, generation.begin(), first_rx, &applied);
        let second = load_into(&generation, generation.begin(), second_rx, &applied);
        let _ = first_tx.send("first");
        let _ = second_tx.send("second");
        tokio::join!(first, second);

        assert_eq!(*applied.borrow(), vec!["second"]);
    }

    #[test]
    fn teardown_invalidates_current_ticket() {
        let generation = LoadGeneration::default();
        let ticket = generation.begin();
        assert!(generation.is_current(ticket));
        generation.teardown();
        assert!(!generation.is_current(ticket));
        assert!(!generation.is_live());
    }

    #[test]
    fn screen_state_keeps_data_across_failures() {
        let mut state = ScreenState::<u32>::default();
        assert!(state.loading);
        state.finish(Ok(3));
        state.start();
        state.finish(Err("boom".into()));
        assert_eq!(state.data, Some(3));
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
    }

    #[test]
    fn handle_drops_updates_after_teardown() {
        let renders = Rc::new(Cell::new(0));
        let notify: Notify = {
            let renders = renders.clone();
            Rc::new(move || renders.set(renders.get() + 1))
        };
        let handle = ScreenHandle::<Vec<u8>>::new(notify);
        let ticket = handle.begin();
        assert_eq!(handle.commit(ticket, |state| state.push(1)), Some(()));
        let stale = ticket;
        let _newer = handle.begin();
        assert_eq!(handle.commit(stale, |state| state.push(2)), None);
        handle.teardown();
        assert_eq!(handle.update(|state| state.push(3)), None);
        assert_eq!(handle.snapshot(), vec![1]);
        assert_eq!(renders.get(), 1);
    }
}
