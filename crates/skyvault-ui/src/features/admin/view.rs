use crate::app::api::ApiCtx;
use crate::app::hooks::use_screen;
use crate::components::atoms::{ErrorMessage, Spinner};
use crate::features::admin::controller::AdminController;
use crate::features::admin::state::UserRow;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct AdminPageProps {
    pub api: ApiCtx,
}

#[function_component(AdminPage)]
pub(crate) fn admin_page(props: &AdminPageProps) -> Html {
    let controller = use_screen(props.api.api(), AdminController::new);
    let state = controller.snapshot();

    if state.loading {
        return html! { <Spinner /> };
    }
    if let Some(message) = state.error.clone() {
        return html! { <ErrorMessage {message} /> };
    }
    let data = state.data.unwrap_or_default();
    let stats = data.stats;

    html! {
        <section class="admin-page">
            <h1 class="page-title">{"Admin"}</h1>
            <div class="admin-stats">
                {stat("gradient-1", "Total users", stats.total_users.to_string())}
                {stat("gradient-2", "Total files", stats.total_files.to_string())}
                {stat("gradient-3", "Total storage (MB)", stats.total_storage_mb.to_string())}
                {stat("gradient-4", "Recent activities", stats.recent_activities.to_string())}
            </div>
            <h2 class="admin-section-title">{"Users"}</h2>
            <div class="table-wrap">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"ID"}</th>
                            <th>{"Email"}</th>
                            <th>{"Name"}</th>
                            <th>{"Admin"}</th>
                            <th>{"Created"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for data.users.iter().map(UserRow::from).map(user_row)}
                    </tbody>
                </table>
            </div>
        </section>
    }
}

fn stat(tone: &'static str, label: &'static str, value: String) -> Html {
    html! {
        <div class={classes!("stat", tone)}>
            <div class="label">{label}</div>
            <div class="value">{value}</div>
        </div>
    }
}

fn user_row(row: UserRow) -> Html {
    let badge = classes!("admin-badge", (row.role != "Admin").then_some("no"));
    html! {
        <tr key={row.id.clone()}>
            <td class="file-meta">{row.id}</td>
            <td class="file-name">{row.email}</td>
            <td class="file-meta">{row.name}</td>
            <td><span class={badge}>{row.role}</span></td>
            <td class="file-meta">{row.created}</td>
        </tr>
    }
}
