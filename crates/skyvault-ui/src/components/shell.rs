//! Signed-in chrome: sidebar navigation plus the top bar.
//!
//! # Design
//! - The admin link is a convenience filter only; the route stays reachable.
//! - Logout replaces the history entry so "back" cannot reopen a protected page.

use crate::app::api::ApiCtx;
use crate::app::preferences::BrowserSessionStore;
use crate::core::routes::Route;
use crate::core::session;
use crate::core::store::{AppStore, app_dispatch, apply_sign_out};
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct PrivateLayoutProps {
    pub children: Children,
    pub active: Route,
}

#[function_component(PrivateLayout)]
pub(crate) fn private_layout(props: &PrivateLayoutProps) -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let email = use_selector(|store: &AppStore| store.user().map(|user| user.email.clone()));
    let shows_admin = use_selector(|store: &AppStore| store.shows_admin());

    let on_logout = {
        Callback::from(move |_| {
            if let Some(ctx) = api_ctx.as_ref() {
                session::logout(&BrowserSessionStore, &*ctx.client);
            }
            app_dispatch().reduce_mut(apply_sign_out);
            if let Some(navigator) = navigator.as_ref() {
                navigator.replace(&Route::Landing);
            }
        })
    };

    html! {
        <div class="app-layout">
            <Sidebar active={props.active.clone()} shows_admin={*shows_admin} />
            <div class="app-main-wrap">
                <Navbar email={(*email).clone()} {on_logout} />
                <main class="app-content">
                    {for props.children.iter()}
                </main>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NavbarProps {
    email: Option<String>,
    on_logout: Callback<MouseEvent>,
}

#[function_component(Navbar)]
fn navbar(props: &NavbarProps) -> Html {
    html! {
        <header class="app-navbar">
            <div class="app-navbar-brand">{"SkyVault"}</div>
            <div class="app-navbar-actions">
                {props.email.clone().map(|email| html! {
                    <>
                        <span class="app-navbar-email" title={email.clone()}>{email}</span>
                        <button type="button" class="btn btn-ghost" onclick={props.on_logout.clone()}>
                            {"Logout"}
                        </button>
                    </>
                }).unwrap_or_default()}
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active: Route,
    shows_admin: bool,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    html! {
        <aside class="app-sidebar-wrap">
            <nav class="app-sidebar">
                {nav_item(Route::Home, "🏠", "Home", &props.active)}
                {nav_item(Route::Files, "📁", "Files", &props.active)}
                {nav_item(Route::History, "📋", "History", &props.active)}
                {if props.shows_admin {
                    nav_item(Route::Admin, "⚙️", "Admin", &props.active)
                } else {
                    html! {}
                }}
            </nav>
        </aside>
    }
}

fn nav_item(route: Route, icon: &'static str, label: &'static str, active: &Route) -> Html {
    let classes = classes!(
        "app-sidebar-link",
        if *active == route { Some("active") } else { None }
    );
    html! {
        <Link<Route> to={route} classes={classes}>
            <span class="nav-icon">{icon}</span>
            {label}
        </Link<Route>>
    }
}
