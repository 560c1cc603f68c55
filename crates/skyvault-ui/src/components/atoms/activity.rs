//! One line of the activity timeline.

use skyvault_api_models::format::{EM_DASH, format_timestamp};
use skyvault_api_models::{ActionKind, HistoryEntry};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ActivityItemProps {
    pub entry: HistoryEntry,
}

#[function_component(ActivityItem)]
pub(crate) fn activity_item(props: &ActivityItemProps) -> Html {
    let entry = &props.entry;
    let kind = entry.kind();
    let icon = match kind {
        ActionKind::Upload => "📤",
        ActionKind::Download => "📥",
        ActionKind::Delete => "🗑️",
    };
    html! {
        <li class="history-item">
            <div class={classes!("history-icon", kind.as_str())}>{icon}</div>
            <div class="history-body">
                <span class="history-action">{entry.action.clone()}</span>
                <span class="history-filename">
                    {entry.filename.clone().unwrap_or_else(|| EM_DASH.to_string())}
                </span>
            </div>
            <span class="history-time">{format_timestamp(entry.created_at.as_deref())}</span>
        </li>
    }
}
