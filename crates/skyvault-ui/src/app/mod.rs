//! Application root: session bootstrap, routing, and the route guard.
//!
//! # Design
//! - The session is checked once per boot; until it resolves every route
//!   renders the full-page spinner instead of guessing.
//! - Route decisions come from `core::routes::resolve`; this module only maps
//!   them onto components.

use crate::components::atoms::Spinner;
use crate::components::shell::PrivateLayout;
use crate::core::routes::{ProtectedPage, PublicPage, Route, RouteDecision, resolve};
use crate::core::session;
use crate::core::store::{AppStore, app_dispatch, apply_bootstrap};
use crate::core::task::spawn_cancellable;
use crate::features::admin::AdminPage;
use crate::features::auth::{LandingPage, LoginPage, RegisterPage};
use crate::features::dashboard::DashboardPage;
use crate::features::files::FilesPage;
use crate::features::history::HistoryPage;
use api::ApiCtx;
use preferences::{BrowserSessionStore, api_base_url};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

pub(crate) mod api;
pub(crate) mod hooks;
pub(crate) mod preferences;

/// Root component: validates the stored session, then renders the guarded router.
#[function_component(SkyVaultApp)]
pub fn skyvault_app() -> Html {
    let api_ctx = use_memo(|_| ApiCtx::new(api_base_url()), ());

    {
        let client = api_ctx.client.clone();
        use_effect_with_deps(
            move |_| {
                let task = spawn_cancellable(async move {
                    let resolved = session::bootstrap(&BrowserSessionStore, &*client).await;
                    app_dispatch().reduce_mut(|store| apply_bootstrap(store, resolved));
                });
                move || drop(task)
            },
            (),
        );
    }

    let routes_ctx = (*api_ctx).clone();
    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <BrowserRouter>
                <Switch<Route> render={move |route| html! {
                    <GuardedRoute {route} api={routes_ctx.clone()} />
                }} />
            </BrowserRouter>
        </ContextProvider<ApiCtx>>
    }
}

#[derive(Properties, PartialEq)]
struct GuardedRouteProps {
    route: Route,
    api: ApiCtx,
}

#[function_component(GuardedRoute)]
fn guarded_route(props: &GuardedRouteProps) -> Html {
    let session = use_selector(|store: &AppStore| store.session.clone());
    let api = props.api.clone();
    match resolve(&props.route, &session) {
        RouteDecision::Pending => html! { <Spinner full_page=true /> },
        RouteDecision::Redirect(to) => html! { <Redirect<Route> {to} /> },
        RouteDecision::Public(page) => match page {
            PublicPage::Landing => html! { <LandingPage /> },
            PublicPage::Login => html! { <LoginPage {api} /> },
            PublicPage::Register => html! { <RegisterPage {api} /> },
        },
        RouteDecision::Protected(page) => {
            let content = match page {
                ProtectedPage::Home => html! { <DashboardPage {api} /> },
                ProtectedPage::Files => html! { <FilesPage {api} /> },
                ProtectedPage::History => html! { <HistoryPage {api} /> },
                ProtectedPage::Admin => html! { <AdminPage {api} /> },
            };
            html! {
                <PrivateLayout active={props.route.clone()}>
                    {content}
                </PrivateLayout>
            }
        }
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<SkyVaultApp>::with_root(root).render();
    } else {
        yew::Renderer::<SkyVaultApp>::new().render();
    }
}
