use crate::app::api::ApiCtx;
use crate::app::hooks::use_screen;
use crate::components::atoms::{
    ActivityItem, CardIcon, DashboardCard, ErrorMessage, Spinner, StorageBar,
};
use crate::core::load::ScreenController;
use crate::features::dashboard::controller::DashboardController;
use crate::features::dashboard::state::{DashboardData, NO_RECENT_ACTIVITY};
use crate::features::upload::UploadModal;
use skyvault_api_models::format::DEFAULT_QUOTA_BYTES;
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DashboardPageProps {
    pub api: ApiCtx,
}

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page(props: &DashboardPageProps) -> Html {
    let controller = use_screen(props.api.api(), DashboardController::new);
    let uploading = use_state(|| false);
    let state = controller.snapshot();

    let reload = {
        let controller = controller.clone();
        Callback::from(move |()| {
            let controller = (*controller).clone();
            spawn_local(async move { controller.load().await });
        })
    };

    if state.loading {
        return html! { <Spinner /> };
    }
    if let Some(message) = state.error.clone() {
        let on_retry = reload.reform(|_: MouseEvent| ());
        return html! {
            <section class="dashboard-page">
                <ErrorMessage {message} />
                <button type="button" class="btn btn-primary" onclick={on_retry}>
                    {"Retry"}
                </button>
            </section>
        };
    }

    let data = state.data.clone().unwrap_or_default();
    let open_upload = {
        let uploading = uploading.clone();
        Callback::from(move |_: MouseEvent| uploading.set(true))
    };
    let close_upload = {
        let uploading = uploading.clone();
        Callback::from(move |()| uploading.set(false))
    };

    html! {
        <section class="dashboard-page">
            <div class="page-header">
                <h1 class="page-title">{"Dashboard"}</h1>
                <button type="button" class="btn btn-primary" onclick={open_upload}>
                    {"Upload file"}
                </button>
            </div>
            <StorageBar
                used_bytes={data.storage.total_bytes}
                quota_bytes={DEFAULT_QUOTA_BYTES}
            />
            {cards(&data)}
            <div class="activity-section">
                <h2>{"Activity summary"}</h2>
                <ul class="activity-list">
                    {for data.recent_activity().iter().map(|entry| html! {
                        <ActivityItem key={entry.id.to_string()} entry={entry.clone()} />
                    })}
                </ul>
                {if data.history.is_empty() {
                    html! { <p class="activity-empty">{NO_RECENT_ACTIVITY}</p> }
                } else {
                    html! {}
                }}
            </div>
            {if *uploading {
                html! {
                    <UploadModal
                        api={props.api.clone()}
                        on_close={close_upload}
                        on_uploaded={reload}
                    />
                }
            } else {
                html! {}
            }}
        </section>
    }
}

fn cards(data: &DashboardData) -> Html {
    let cards = data.cards();
    html! {
        <div class="dashboard-grid">
            <DashboardCard label="Total storage used" value={cards.storage_used} icon={CardIcon::Storage} />
            <DashboardCard label="Files uploaded" value={cards.files_uploaded} icon={CardIcon::Files} />
            <DashboardCard label="Last upload" value={cards.last_upload} icon={CardIcon::Time} />
            <DashboardCard
                label="Recent activity count"
                value={cards.activity_count}
                icon={CardIcon::Activity}
            />
        </div>
    }
}
