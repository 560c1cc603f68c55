//! Public pages: landing, sign-in, and registration.
//!
//! # Design
//! - Inputs are disabled while a request is in flight, so the form snapshot
//!   taken at submit time is still current when the response lands.
//! - Success replaces the history entry; "back" never returns to the form.

use crate::app::api::ApiCtx;
use crate::app::preferences::BrowserSessionStore;
use crate::core::routes::Route;
use crate::core::session;
use crate::core::store::{app_dispatch, apply_sign_in};
use crate::features::auth::state::{LoginForm, RegisterForm};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};

const FEATURES: [(&str, &str, &str); 3] = [
    ("🔒", "Secure", "Your files are stored safely with authentication."),
    ("📋", "History", "See upload and download activity anytime."),
    ("📦", "Storage", "Track usage and manage your files in one place."),
];

const STEPS: [&str; 3] = [
    "Create an account or log in.",
    "Upload your files from the dashboard.",
    "View history and manage storage anytime.",
];

#[function_component(LandingPage)]
pub(crate) fn landing_page() -> Html {
    html! {
        <div class="landing-page">
            <section class="landing-hero">
                <div class="landing-hero-content">
                    <h1>{"Your files, secure in the cloud"}</h1>
                    <p class="subheading">
                        {"Upload, store, and access your files from anywhere. Simple, fast, and private."}
                    </p>
                    <div class="landing-hero-cta">
                        <Link<Route> to={Route::Login} classes="btn btn-primary">{"Login"}</Link<Route>>
                        <Link<Route> to={Route::Register} classes="btn btn-secondary">{"Register"}</Link<Route>>
                    </div>
                </div>
            </section>
            <section class="landing-section">
                <h2 class="landing-section-title">{"Why use SkyVault?"}</h2>
                <div class="landing-features">
                    {for FEATURES.iter().map(|(icon, title, desc)| html! {
                        <div key={*title} class="landing-feature-card">
                            <div class="landing-feature-icon">{*icon}</div>
                            <h3>{*title}</h3>
                            <p>{*desc}</p>
                        </div>
                    })}
                </div>
            </section>
            <section class="landing-section landing-how">
                <h2 class="landing-section-title">{"How it works"}</h2>
                <ol class="landing-how-list">
                    {for STEPS.iter().enumerate().map(|(index, text)| html! {
                        <li key={index.to_string()}>
                            <span class="landing-how-step">{(index + 1).to_string()}</span>
                            <span>{*text}</span>
                        </li>
                    })}
                </ol>
            </section>
            <footer class="landing-footer">
                {"SkyVault – Secure storage. Login or Register to get started."}
            </footer>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct AuthPageProps {
    pub api: ApiCtx,
}

#[function_component(LoginPage)]
pub(crate) fn login_page(props: &AuthPageProps) -> Html {
    let form = use_state(LoginForm::default);
    let navigator = use_navigator();

    let on_submit = {
        let form = form.clone();
        let client = props.api.client.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if form.busy {
                return;
            }
            let request = match form.request() {
                Ok(request) => request,
                Err(message) => {
                    form.set(LoginForm {
                        error: Some(message),
                        ..(*form).clone()
                    });
                    return;
                }
            };
            let submitted = LoginForm {
                busy: true,
                error: None,
                ..(*form).clone()
            };
            form.set(submitted.clone());
            let form = form.clone();
            let client = client.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match session::login(&BrowserSessionStore, &*client, &request).await {
                    Ok(signed_in) => {
                        app_dispatch().reduce_mut(|store| apply_sign_in(store, signed_in));
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Home);
                        }
                    }
                    Err(err) => form.set(LoginForm {
                        busy: false,
                        error: Some(err.to_string()),
                        ..submitted
                    }),
                }
            });
        })
    };
    let on_email = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            form.set(LoginForm {
                email: input_value(&event),
                ..(*form).clone()
            });
        })
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            form.set(LoginForm {
                password: input_value(&event),
                ..(*form).clone()
            });
        })
    };
    let on_toggle = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(LoginForm {
                show_password: !form.show_password,
                ..(*form).clone()
            });
        })
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{"Login"}</h1>
                <p>{"Sign in to access your cloud storage."}</p>
                <form class="auth-form" onsubmit={on_submit}>
                    {email_field(&form.email, form.busy, on_email)}
                    {password_field(&form.password, form.show_password, form.busy, on_password, on_toggle)}
                    {error_line(form.error.as_deref())}
                    <button type="submit" disabled={form.busy}>
                        {submit_content(form.busy, form.submit_label())}
                    </button>
                </form>
                <p class="auth-footer">
                    {"Don't have an account? "}
                    <Link<Route> to={Route::Register}>{"Register"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}

#[function_component(RegisterPage)]
pub(crate) fn register_page(props: &AuthPageProps) -> Html {
    let form = use_state(RegisterForm::default);
    let navigator = use_navigator();

    let on_submit = {
        let form = form.clone();
        let client = props.api.client.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if form.busy {
                return;
            }
            let request = match form.request() {
                Ok(request) => request,
                Err(message) => {
                    form.set(RegisterForm {
                        error: Some(message),
                        ..(*form).clone()
                    });
                    return;
                }
            };
            let submitted = RegisterForm {
                busy: true,
                error: None,
                ..(*form).clone()
            };
            form.set(submitted.clone());
            let form = form.clone();
            let client = client.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match session::register(&BrowserSessionStore, &*client, &request).await {
                    Ok(signed_in) => {
                        app_dispatch().reduce_mut(|store| apply_sign_in(store, signed_in));
                        if let Some(navigator) = navigator {
                            navigator.replace(&Route::Home);
                        }
                    }
                    Err(err) => form.set(RegisterForm {
                        busy: false,
                        error: Some(err.to_string()),
                        ..submitted
                    }),
                }
            });
        })
    };
    let on_name = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            form.set(RegisterForm {
                full_name: input_value(&event),
                ..(*form).clone()
            });
        })
    };
    let on_email = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            form.set(RegisterForm {
                email: input_value(&event),
                ..(*form).clone()
            });
        })
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            form.set(RegisterForm {
                password: input_value(&event),
                ..(*form).clone()
            });
        })
    };
    let on_toggle = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(RegisterForm {
                show_password: !form.show_password,
                ..(*form).clone()
            });
        })
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{"Register"}</h1>
                <p>{"Create an account to start storing files."}</p>
                <form class="auth-form" onsubmit={on_submit}>
                    <label>
                        {"Full name"}
                        <div class="input-wrap">
                            <input
                                type="text"
                                value={form.full_name.clone()}
                                oninput={on_name}
                                disabled={form.busy}
                                placeholder="Your name"
                            />
                        </div>
                    </label>
                    {email_field(&form.email, form.busy, on_email)}
                    {password_field(&form.password, form.show_password, form.busy, on_password, on_toggle)}
                    {error_line(form.error.as_deref())}
                    <button type="submit" disabled={form.busy}>
                        {submit_content(form.busy, form.submit_label())}
                    </button>
                </form>
                <p class="auth-footer">
                    {"Already have an account? "}
                    <Link<Route> to={Route::Login}>{"Login"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}

fn input_value(event: &InputEvent) -> String {
    event.target_unchecked_into::<HtmlInputElement>().value()
}

fn email_field(value: &str, busy: bool, oninput: Callback<InputEvent>) -> Html {
    html! {
        <label>
            {"Email"}
            <div class="input-wrap">
                <input
                    type="email"
                    value={value.to_string()}
                    {oninput}
                    disabled={busy}
                    required=true
                    placeholder="you@example.com"
                />
            </div>
        </label>
    }
}

fn password_field(
    value: &str,
    shown: bool,
    busy: bool,
    oninput: Callback<InputEvent>,
    on_toggle: Callback<MouseEvent>,
) -> Html {
    html! {
        <label>
            {"Password"}
            <div class="input-wrap">
                <input
                    type={if shown { "text" } else { "password" }}
                    value={value.to_string()}
                    {oninput}
                    disabled={busy}
                    required=true
                    placeholder="••••••••"
                />
                <button
                    type="button"
                    class="password-toggle"
                    onclick={on_toggle}
                    aria-label={if shown { "Hide password" } else { "Show password" }}
                >
                    {if shown { "🙈" } else { "👁" }}
                </button>
            </div>
        </label>
    }
}

fn error_line(error: Option<&str>) -> Html {
    error
        .map(|message| html! { <p class="auth-error">{message.to_string()}</p> })
        .unwrap_or_default()
}

fn submit_content(busy: bool, label: &'static str) -> Html {
    if busy {
        html! {
            <span class="btn-loading">
                <span class="btn-spinner" />
                {label}
            </span>
        }
    } else {
        html! { {label} }
    }
}
