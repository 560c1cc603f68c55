//! App-wide yewdux store.
//!
//! # Design
//! - The session is the only state shared across screens; everything else
//!   stays screen-local.
//! - Mutations go through small reducer helpers so the view layer never edits
//!   the slice by hand.

use crate::core::session::{Session, SessionState};
use skyvault_api_models::User;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Global application store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct AppStore {
    /// Who is signed in, or whether that is still being checked.
    pub session: SessionState,
}

impl AppStore {
    /// Signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    /// Whether the current user may see admin navigation.
    #[must_use]
    pub fn shows_admin(&self) -> bool {
        self.user().is_some_and(|user| user.is_admin)
    }
}

/// Handle to the global store.
#[must_use]
pub fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}

/// Record the outcome of boot-time validation.
pub fn apply_bootstrap(store: &mut AppStore, resolved: SessionState) {
    store.session = resolved;
}

/// Record a freshly opened session.
pub fn apply_sign_in(store: &mut AppStore, session: Session) {
    store.session = SessionState::Authenticated(session);
}

/// Forget the current session.
pub fn apply_sign_out(store: &mut AppStore) {
    store.session = SessionState::Anonymous;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::user;
    use skyvault_api_models::AuthResponse;

    fn session(is_admin: bool) -> Session {
        Session::from_auth(AuthResponse {
            access_token: "tok".into(),
            token_type: "bearer".into(),
            user: user(2, "admin@example.com", is_admin),
        })
    }

    #[test]
    fn store_starts_unresolved() {
        let store = AppStore::default();
        assert_eq!(store.session, SessionState::Checking);
        assert!(!store.shows_admin());
    }

    #[test]
    fn sign_in_and_out_round_trip() {
        let mut store = AppStore::default();
        apply_bootstrap(&mut store, SessionState::Anonymous);
        apply_sign_in(&mut store, session(true));
        assert!(store.shows_admin());
        assert_eq!(store.user().map(|user| user.id), Some(2));

        apply_sign_out(&mut store);
        assert_eq!(store.session, SessionState::Anonymous);
    }

    #[test]
    fn admin_link_hidden_for_regular_users() {
        let mut store = AppStore::default();
        apply_sign_in(&mut store, session(false));
        assert!(!store.shows_admin());
    }
}
