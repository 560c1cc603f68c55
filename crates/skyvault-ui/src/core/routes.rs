//! Route table and the session-aware route guard.
//!
//! # Design
//! - The guard is a pure function of route and session state; views only
//!   render whatever decision it returns.
//! - The admin route is open to every signed-in user here. The backend is the
//!   authority on admin access and the admin screen surfaces its refusal.

use crate::core::session::SessionState;
use yew_router::prelude::*;

/// Every addressable screen.
#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    /// Public landing page.
    #[at("/")]
    Landing,
    /// Sign-in form.
    #[at("/login")]
    Login,
    /// Account creation form.
    #[at("/register")]
    Register,
    /// Signed-in dashboard.
    #[at("/home")]
    Home,
    /// File list with upload, download, and delete.
    #[at("/files")]
    Files,
    /// Activity history.
    #[at("/history")]
    History,
    /// Admin overview.
    #[at("/admin")]
    Admin,
    /// Anything unrecognised.
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Screens rendered without chrome for anonymous visitors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublicPage {
    /// Landing page.
    Landing,
    /// Sign-in form.
    Login,
    /// Registration form.
    Register,
}

/// Screens rendered inside the signed-in layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtectedPage {
    /// Dashboard.
    Home,
    /// File list.
    Files,
    /// Activity history.
    History,
    /// Admin overview.
    Admin,
}

/// Outcome of running the guard for one navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session validation is still running; render nothing but a spinner.
    Pending,
    /// Render a public page.
    Public(PublicPage),
    /// Render a protected page inside the shared chrome.
    Protected(ProtectedPage),
    /// Navigate elsewhere, replacing the current history entry.
    Redirect(Route),
}

/// Decide what to render for `route` given the current session.
#[must_use]
pub fn resolve(route: &Route, session: &SessionState) -> RouteDecision {
    if !session.is_resolved() {
        return RouteDecision::Pending;
    }
    let signed_in = session.session().is_some();
    let public = |page| {
        if signed_in {
            RouteDecision::Redirect(Route::Home)
        } else {
            RouteDecision::Public(page)
        }
    };
    let protected = |page| {
        if signed_in {
            RouteDecision::Protected(page)
        } else {
            RouteDecision::Redirect(Route::Landing)
        }
    };
    match route {
        Route::Landing => public(PublicPage::Landing),
        Route::Login => public(PublicPage::Login),
        Route::Register => public(PublicPage::Register),
        Route::Home => protected(ProtectedPage::Home),
        Route::Files => protected(ProtectedPage::Files),
        Route::History => protected(ProtectedPage::History),
        Route::Admin => protected(ProtectedPage::Admin),
        Route::NotFound => RouteDecision::Redirect(Route::Landing),
    }
}

/// Resolve a raw location path.
#[must_use]
pub fn resolve_path(path: &str, session: &SessionState) -> RouteDecision {
    let route = Route::recognize(path).unwrap_or(Route::NotFound);
    resolve(&route, session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::Session;
    use crate::core::testing::user;
    use skyvault_api_models::AuthResponse;

    fn signed_in(is_admin: bool) -> SessionState {
        let response = AuthResponse {
            access_token: "tok".into(),
            token_type: "bearer".into(),
            user: user(1, "u@example.com", is_admin),
        };
        SessionState::Authenticated(Session::from_auth(response))
    }

    #[test]
    fn anonymous_is_sent_to_landing_from_protected_paths() {
        assert_eq!(
            resolve_path("/files", &SessionState::Anonymous),
            RouteDecision::Redirect(Route::Landing)
        );
        assert_eq!(
            resolve(&Route::Admin, &SessionState::Anonymous),
            RouteDecision::Redirect(Route::Landing)
        );
        assert_eq!(
            resolve(&Route::Login, &SessionState::Anonymous),
            RouteDecision::Public(PublicPage::Login)
        );
    }

    #[test]
    fn signed_in_users_skip_public_pages() {
        let state = signed_in(false);
        assert_eq!(
            resolve_path("/login", &state),
            RouteDecision::Redirect(Route::Home)
        );
        assert_eq!(
            resolve(&Route::Landing, &state),
            RouteDecision::Redirect(Route::Home)
        );
        assert_eq!(
            resolve(&Route::Files, &state),
            RouteDecision::Protected(ProtectedPage::Files)
        );
    }

    #[test]
    fn unknown_paths_redirect_to_landing() {
        for state in [SessionState::Anonymous, signed_in(true)] {
            assert_eq!(
                resolve_path("/does/not/exist", &state),
                RouteDecision::Redirect(Route::Landing)
            );
        }
    }

    #[test]
    fn admin_route_is_open_to_non_admins() {
        assert_eq!(
            resolve(&Route::Admin, &signed_in(false)),
            RouteDecision::Protected(ProtectedPage::Admin)
        );
    }

    #[test]
    fn checking_blocks_rendering() {
        assert_eq!(
            resolve(&Route::Files, &SessionState::Checking),
            RouteDecision::Pending
        );
    }
}
