//! Upload modal: picker, drop zone, synthetic progress, and retry.
//!
//! # Design
//! - Timers live here; the controller only sequences the transfer.
//! - The backdrop and cancel button are inert while a transfer runs.
//! - The in-flight transfer is aborted if the modal unmounts.

use crate::app::api::ApiCtx;
use crate::app::hooks::use_notify;
use crate::core::task::{TaskHandle, spawn_cancellable};
use crate::features::upload::controller::{UploadController, UploadFn};
use crate::features::upload::state::{SUCCESS_DELAY_MS, TICK_MS, UploadStatus, UploadTask};
use futures_util::FutureExt;
use gloo_timers::callback::{Interval, Timeout};
use skyvault_api_models::format::format_size;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};
use yew::prelude::*;

type Worker = Rc<RefCell<Option<TaskHandle>>>;

#[derive(Properties, PartialEq)]
pub(crate) struct UploadModalProps {
    pub api: ApiCtx,
    /// Files dropped outside the modal that should start uploading at once.
    #[prop_or_default]
    pub initial: Vec<File>,
    pub on_close: Callback<()>,
    pub on_uploaded: Callback<()>,
}

#[function_component(UploadModal)]
pub(crate) fn upload_modal(props: &UploadModalProps) -> Html {
    let notify = use_notify();
    let controller = {
        let client = props.api.client.clone();
        use_memo(
            move |_| {
                let upload = UploadFn::new(move |file: File| {
                    let client = client.clone();
                    async move {
                        client
                            .upload(&file)
                            .await
                            .map(|_| ())
                            .map_err(|err| err.to_string())
                    }
                    .boxed_local()
                });
                UploadController::new(upload, notify)
            },
            (),
        )
    };
    let worker: Worker = use_mut_ref(|| None);
    let input_ref = use_node_ref();
    let task = controller.snapshot();

    {
        let controller = (*controller).clone();
        let worker = worker.clone();
        let initial = props.initial.clone();
        use_effect_with_deps(
            move |_| {
                if initial.is_empty() {
                    controller.update(UploadTask::open);
                } else {
                    launch(&controller, &worker, initial);
                }
                move || {
                    worker.borrow_mut().take();
                }
            },
            (),
        );
    }

    {
        let controller = (*controller).clone();
        use_effect_with_deps(
            move |uploading| {
                let ticker = uploading.then(|| {
                    Interval::new(TICK_MS, move || {
                        controller.update(UploadTask::tick);
                    })
                });
                move || drop(ticker)
            },
            task.is_uploading(),
        );
    }

    {
        let controller = (*controller).clone();
        let on_close = props.on_close.clone();
        let on_uploaded = props.on_uploaded.clone();
        use_effect_with_deps(
            move |succeeded| {
                let closer = succeeded.then(|| {
                    on_uploaded.emit(());
                    Timeout::new(SUCCESS_DELAY_MS, move || {
                        if controller.update(UploadTask::finish) {
                            on_close.emit(());
                        }
                    })
                });
                move || drop(closer)
            },
            task.status() == UploadStatus::Success,
        );
    }

    let on_dismiss = {
        let controller = (*controller).clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            if controller.update(UploadTask::cancel) {
                on_close.emit(());
            }
        })
    };
    let on_retry = {
        let controller = (*controller).clone();
        let worker = worker.clone();
        Callback::from(move |_: MouseEvent| {
            let retrying = controller.clone();
            *worker.borrow_mut() = Some(spawn_cancellable(async move {
                let _ = retrying.retry().await;
            }));
        })
    };
    let on_pick = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };
    let on_input = {
        let controller = (*controller).clone();
        let worker = worker.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let files = collect_files(input.files());
            input.set_value("");
            launch(&controller, &worker, files);
        })
    };
    let on_drag_over = {
        let controller = (*controller).clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            if !controller.snapshot().dragging() {
                controller.update(|task| task.set_dragging(true));
            }
        })
    };
    let on_drag_leave = {
        let controller = (*controller).clone();
        Callback::from(move |_: DragEvent| {
            controller.update(|task| task.set_dragging(false));
        })
    };
    let on_drop = {
        let controller = (*controller).clone();
        let worker = worker.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            controller.update(|task| task.set_dragging(false));
            let files = collect_files(event.data_transfer().and_then(|data| data.files()));
            launch(&controller, &worker, files);
        })
    };
    let stop = Callback::from(|event: MouseEvent| event.stop_propagation());

    let status = task.status();
    let busy = task.is_uploading();
    let body = match status {
        UploadStatus::Success => html! {
            <div class="upload-success">
                <span class="upload-success-icon">{"✓"}</span>
                <p>{"Upload complete!"}</p>
            </div>
        },
        UploadStatus::Uploading | UploadStatus::Error => html! {
            <div class="upload-progress">
                {preview(task.file())}
                <div class="progress-track">
                    <div class="progress-fill" style={format!("width: {}%", task.progress())} />
                </div>
                <p class="progress-label">
                    {if busy { "Uploading… " } else { "" }}
                    {format!("{}%", task.progress())}
                </p>
                {task.error().map(|message| html! {
                    <p class="msg-error">{message.to_string()}</p>
                }).unwrap_or_default()}
            </div>
        },
        UploadStatus::Idle => html! {
            <div
                class={classes!("drop-zone", task.dragging().then_some("dragging"))}
                onclick={on_pick}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                ondrop={on_drop}
            >
                <span class="drop-zone-icon">{"☁️"}</span>
                <p>{"Click or drag a file here"}</p>
                {preview(task.file())}
            </div>
        },
    };

    html! {
        <div class="modal-backdrop" onclick={on_dismiss.clone()}>
            <div class="modal" role="dialog" aria-modal="true" onclick={stop}>
                <h3>{"Upload file"}</h3>
                <input
                    ref={input_ref}
                    type="file"
                    class="hidden"
                    onchange={on_input}
                />
                {task.notice().map(|notice| html! {
                    <p class="msg-notice">{notice.to_string()}</p>
                }).unwrap_or_default()}
                {body}
                <div class="modal-actions">
                    {if status == UploadStatus::Error {
                        html! {
                            <button type="button" class="btn btn-primary" onclick={on_retry}>
                                {"Retry"}
                            </button>
                        }
                    } else {
                        html! {}
                    }}
                    <button
                        type="button"
                        class="btn btn-ghost"
                        disabled={busy}
                        onclick={on_dismiss}
                    >
                        {"Cancel"}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Start sending the first of `files` unless a transfer is already running.
fn launch(controller: &UploadController<File>, worker: &Worker, files: Vec<File>) {
    if files.is_empty() || controller.snapshot().is_uploading() {
        return;
    }
    let controller = controller.clone();
    *worker.borrow_mut() = Some(spawn_cancellable(async move {
        let _ = controller.choose(files).await;
    }));
}

fn collect_files(list: Option<FileList>) -> Vec<File> {
    list.map(|list| (0..list.length()).filter_map(|index| list.item(index)).collect())
        .unwrap_or_default()
}

fn preview(file: Option<&File>) -> Html {
    file.map(|file| {
        html! {
            <div class="file-preview">
                <span class="file-preview-name">{file.name()}</span>
                <span class="file-preview-size">{format_size(file.size() as u64)}</span>
            </div>
        }
    })
    .unwrap_or_default()
}
