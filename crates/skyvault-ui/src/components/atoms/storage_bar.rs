//! Storage usage bar and the dashboard stat card.

use skyvault_api_models::format::{format_gigabytes, format_megabytes, storage_percent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct StorageBarProps {
    pub used_bytes: u64,
    pub quota_bytes: u64,
}

#[function_component(StorageBar)]
pub(crate) fn storage_bar(props: &StorageBarProps) -> Html {
    let percent = storage_percent(props.used_bytes, props.quota_bytes);
    html! {
        <div class="storage-bar-wrap">
            <div class="label">
                <span>{"Storage used"}</span>
                <span>
                    {format!(
                        "{} MB / {} GB",
                        format_megabytes(props.used_bytes),
                        format_gigabytes(props.quota_bytes)
                    )}
                </span>
            </div>
            <div class="storage-bar-track">
                <div class="storage-bar-fill" style={format!("width: {percent}%")} />
            </div>
        </div>
    }
}

/// Icon family for a dashboard card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CardIcon {
    Storage,
    Files,
    Time,
    Activity,
}

impl CardIcon {
    const fn glyph(self) -> &'static str {
        match self {
            Self::Storage => "💾",
            Self::Files => "📁",
            Self::Time => "🕐",
            Self::Activity => "📊",
        }
    }

    const fn class(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Files => "files",
            Self::Time => "time",
            Self::Activity => "activity",
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct DashboardCardProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub icon: CardIcon,
}

#[function_component(DashboardCard)]
pub(crate) fn dashboard_card(props: &DashboardCardProps) -> Html {
    let kind = props.icon.class();
    html! {
        <div class={classes!("dashboard-card", format!("{kind}-card"))}>
            <div class={classes!("card-icon", kind)}>{props.icon.glyph()}</div>
            <div class="label">{props.label.clone()}</div>
            <div class="value">{props.value.clone()}</div>
        </div>
    }
}
