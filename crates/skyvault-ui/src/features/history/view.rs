use crate::app::api::ApiCtx;
use crate::app::hooks::use_screen;
use crate::components::atoms::{ActivityItem, EmptyState, ErrorMessage, Spinner};
use crate::features::history::controller::HistoryController;
use crate::features::history::state::{CLEAR_PROMPT, EMPTY_MESSAGE};
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct HistoryPageProps {
    pub api: ApiCtx,
}

#[function_component(HistoryPage)]
pub(crate) fn history_page(props: &HistoryPageProps) -> Html {
    let controller = use_screen(props.api.api(), HistoryController::new);
    let state = controller.snapshot();

    if state.screen.loading {
        return html! { <Spinner /> };
    }
    if let Some(message) = state.screen.error.clone() {
        return html! {
            <section class="history-page">
                <ErrorMessage {message} />
            </section>
        };
    }

    let on_clear = {
        let controller = (*controller).clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.clear(|| gloo::dialogs::confirm(CLEAR_PROMPT)).await;
            });
        })
    };

    html! {
        <section class="history-page">
            <div class="history-header">
                <h1 class="page-title">{"History"}</h1>
                {if state.shows_clear() {
                    html! {
                        <button
                            type="button"
                            class="btn btn-danger"
                            disabled={state.clearing}
                            onclick={on_clear}
                        >
                            {state.clear_label()}
                        </button>
                    }
                } else {
                    html! {}
                }}
            </div>
            <div class="history-list">
                {if state.is_empty() {
                    html! { <EmptyState message={EMPTY_MESSAGE} class="history-empty" /> }
                } else {
                    html! {
                        <ul>
                            {for state.entries().iter().map(|entry| html! {
                                <ActivityItem key={entry.id.to_string()} entry={entry.clone()} />
                            })}
                        </ul>
                    }
                }}
            </div>
        </section>
    }
}
