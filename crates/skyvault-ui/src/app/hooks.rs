//! Hooks binding controllers to component lifetimes.

use crate::core::api::CloudApi;
use crate::core::load::{Notify, ScreenController};
use crate::core::task::spawn_cancellable;
use std::rc::Rc;
use yew::prelude::*;

/// Re-render hook for a controller owned by the calling component.
#[hook]
pub(crate) fn use_notify() -> Notify {
    let refresh = use_force_update();
    let notify = use_memo(move |_| -> Notify { Rc::new(move || refresh.force_update()) }, ());
    (*notify).clone()
}

/// Build a screen controller once, load it on mount, and tear it down on unmount.
#[hook]
pub(crate) fn use_screen<C, B>(api: Rc<dyn CloudApi>, build: B) -> Rc<C>
where
    C: ScreenController,
    B: FnOnce(Rc<dyn CloudApi>, Notify) -> C + 'static,
{
    let notify = use_notify();
    let controller = use_memo(move |_| build(api, notify), ());
    {
        let controller = controller.clone();
        use_effect_with_deps(
            move |_| {
                let loader = (*controller).clone();
                let task = spawn_cancellable(async move { loader.load().await });
                move || {
                    task.cancel();
                    controller.teardown();
                }
            },
            (),
        );
    }
    controller
}
