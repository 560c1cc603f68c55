//! File list screen with download, delete, and a page-wide drop zone.

use crate::app::api::ApiCtx;
use crate::app::hooks::use_screen;
use crate::components::atoms::{EmptyState, ErrorMessage, Spinner};
use crate::core::api::DownloadedFile;
use crate::core::load::ScreenController;
use crate::features::files::controller::FilesController;
use crate::features::files::state::{DELETE_PROMPT, DROP_HINT, EMPTY_MESSAGE, FilesState};
use crate::features::upload::UploadModal;
use gloo::console;
use gloo::file::{Blob, ObjectUrl};
use gloo_timers::callback::Timeout;
use skyvault_api_models::FileRecord;
use skyvault_api_models::format::{format_size, format_timestamp};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DragEvent, File, HtmlAnchorElement};
use yew::platform::spawn_local;
use yew::prelude::*;

/// Keep the object URL alive long enough for the browser to start saving.
const REVOKE_DELAY_MS: u32 = 1_000;

#[derive(Properties, PartialEq)]
pub(crate) struct FilesPageProps {
    pub api: ApiCtx,
}

#[function_component(FilesPage)]
pub(crate) fn files_page(props: &FilesPageProps) -> Html {
    let controller = use_screen(props.api.api(), FilesController::new);
    let upload = use_state(|| None as Option<Vec<File>>);
    let dragging = use_state(|| false);
    let state = controller.snapshot();

    let open_upload = {
        let upload = upload.clone();
        Callback::from(move |_: MouseEvent| upload.set(Some(Vec::new())))
    };
    let close_upload = {
        let upload = upload.clone();
        Callback::from(move |()| upload.set(None))
    };
    let on_uploaded = {
        let controller = controller.clone();
        Callback::from(move |()| {
            let controller = (*controller).clone();
            spawn_local(async move { controller.load().await });
        })
    };
    let on_drag_over = {
        let dragging = dragging.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            if !*dragging {
                dragging.set(true);
            }
        })
    };
    let on_drag_leave = {
        let dragging = dragging.clone();
        Callback::from(move |_: DragEvent| dragging.set(false))
    };
    let on_drop = {
        let dragging = dragging.clone();
        let upload = upload.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            dragging.set(false);
            let files: Vec<File> = event
                .data_transfer()
                .and_then(|data| data.files())
                .map(|list| (0..list.length()).filter_map(|index| list.item(index)).collect())
                .unwrap_or_default();
            if !files.is_empty() && upload.is_none() {
                upload.set(Some(files));
            }
        })
    };

    html! {
        <section class="files-page">
            <div class="page-header">
                <h1 class="page-title">{"Files"}</h1>
                <button type="button" class="btn btn-primary" onclick={open_upload}>
                    {"Upload file"}
                </button>
            </div>
            <div
                class={classes!("files-drop-zone", (*dragging).then_some("dragging"))}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                ondrop={on_drop}
            >
                {DROP_HINT}
            </div>
            {state.action_error.clone().map(|message| html! {
                <ErrorMessage message={message} />
            }).unwrap_or_default()}
            {file_table(&controller, &state)}
            {(*upload).clone().map(|initial| html! {
                <UploadModal
                    api={props.api.clone()}
                    {initial}
                    on_close={close_upload}
                    {on_uploaded}
                />
            }).unwrap_or_default()}
        </section>
    }
}

fn file_table(controller: &Rc<FilesController>, state: &FilesState) -> Html {
    if state.shows_spinner() {
        return html! { <Spinner /> };
    }
    if let Some(message) = state.screen.error.clone() {
        return html! { <ErrorMessage message={message} /> };
    }
    if state.is_empty() {
        return html! { <EmptyState message={EMPTY_MESSAGE} /> };
    }
    html! {
        <div class="table-wrap">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"Size"}</th>
                        <th>{"Uploaded"}</th>
                        <th />
                    </tr>
                </thead>
                <tbody>
                    {for state.files().iter().map(|file| file_row(controller, state, file))}
                </tbody>
            </table>
        </div>
    }
}

fn file_row(controller: &Rc<FilesController>, state: &FilesState, file: &FileRecord) -> Html {
    let id = file.id;
    let downloading = state.is_downloading(id);
    let deleting = state.is_deleting(id);
    let on_download = {
        let controller = (**controller).clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                if let Some(file) = controller.download(id).await {
                    if let Err(err) = save_download(&file) {
                        console::error!("download save failed", file.filename.clone(), err);
                    }
                }
            });
        })
    };
    let on_delete = {
        let controller = (**controller).clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                controller
                    .delete(id, || gloo::dialogs::confirm(DELETE_PROMPT))
                    .await;
            });
        })
    };
    html! {
        <tr key={id.to_string()}>
            <td class="file-name">{file.original_filename.clone()}</td>
            <td>{format_size(file.size_bytes)}</td>
            <td>{format_timestamp(file.uploaded_at.as_deref())}</td>
            <td class="row-actions">
                <button
                    type="button"
                    class="btn btn-secondary btn-sm"
                    disabled={downloading}
                    onclick={on_download}
                >
                    {if downloading { "…" } else { "Download" }}
                </button>
                <button
                    type="button"
                    class="btn btn-danger btn-sm"
                    disabled={deleting}
                    onclick={on_delete}
                >
                    {if deleting { "…" } else { "Delete" }}
                </button>
            </td>
        </tr>
    }
}

/// Hand downloaded bytes to the browser as a file save.
fn save_download(file: &DownloadedFile) -> Result<(), JsValue> {
    let blob = Blob::new_with_options(file.bytes.as_slice(), file.content_type.as_deref());
    let url = ObjectUrl::from(blob);
    let anchor: HtmlAnchorElement = gloo::utils::document()
        .create_element("a")?
        .dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    anchor.click();
    Timeout::new(REVOKE_DELAY_MS, move || drop(url)).forget();
    Ok(())
}
