//! Loading indicators.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct SpinnerProps {
    /// Stretch to the full viewport (used while the session is checked).
    #[prop_or_default]
    pub full_page: bool,
}

#[function_component(Spinner)]
pub(crate) fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class={classes!("app-loading", props.full_page.then_some("full-page"))}>
            <div class="spinner" />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ErrorMessageProps {
    pub message: AttrValue,
}

#[function_component(ErrorMessage)]
pub(crate) fn error_message(props: &ErrorMessageProps) -> Html {
    html! { <p class="msg-error">{props.message.clone()}</p> }
}
