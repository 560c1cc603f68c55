//! Session lifecycle: restore on boot, open on login/register, close on logout.
//!
//! # Design
//! - A [`Session`] can only be built from a server response (auth payload or a
//!   successful `me` call), so holding a user always implies a token the
//!   backend accepted at least once.
//! - The cached user snapshot is never trusted on boot; the server copy wins.
//! - Any failed validation clears the persisted session. Expired tokens and an
//!   unreachable backend are treated the same.
//! - Persistence sits behind [`SessionStore`] so the browser and tests can
//!   supply their own backing storage.

use crate::core::api::CloudApi;
use skyvault_api_models::{ApiError, AuthResponse, LoginRequest, RegisterRequest, User};

/// Raw persisted values, exactly as found in storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredSession {
    /// Bearer token, if one was saved.
    pub token: Option<String>,
    /// JSON snapshot of the user, if one was saved.
    pub user: Option<String>,
}

/// Client-side persistence for the session token and user snapshot.
pub trait SessionStore {
    /// Read whatever is currently persisted.
    fn read(&self) -> StoredSession;
    /// Persist the token together with a user snapshot.
    fn write(&self, token: &str, user: &User);
    /// Remove the token and the user snapshot together.
    fn clear(&self);
}

/// A validated credential and the account it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: User,
}

impl Session {
    /// Bearer token for authenticated requests.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The signed-in account.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    pub(crate) fn from_auth(response: AuthResponse) -> Self {
        Self {
            token: response.access_token,
            user: response.user,
        }
    }
}

/// The client's belief about who is signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Boot-time validation has not finished; rendering is blocked.
    #[default]
    Checking,
    /// Nobody is signed in.
    Anonymous,
    /// A validated session is active.
    Authenticated(Session),
}

impl SessionState {
    /// Whether the boot-time check has completed.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Checking)
    }

    /// Active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Checking | Self::Anonymous => None,
        }
    }

    /// Signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session().map(Session::user)
    }
}

/// Restore the persisted session and confirm it with the backend.
///
/// Always resolves to [`SessionState::Anonymous`] or
/// [`SessionState::Authenticated`]. On success the API client keeps the
/// restored token; on any failure the persisted session is cleared.
pub async fn bootstrap<S, A>(store: &S, api: &A) -> SessionState
where
    S: SessionStore + ?Sized,
    A: CloudApi + ?Sized,
{
    let stored = store.read();
    let Some(token) = stored.token.filter(|token| !token.trim().is_empty()) else {
        return SessionState::Anonymous;
    };
    let cached = stored
        .user
        .as_deref()
        .and_then(|raw| serde_json::from_str::<User>(raw).ok());
    if cached.is_none() {
        store.clear();
        return SessionState::Anonymous;
    }

    api.set_token(Some(token.clone()));
    match api.me().await {
        Ok(user) => {
            store.write(&token, &user);
            SessionState::Authenticated(Session { token, user })
        }
        Err(_) => {
            api.set_token(None);
            store.clear();
            SessionState::Anonymous
        }
    }
}

/// Sign in, persist the session, and arm the API client with the new token.
///
/// # Errors
/// Returns the normalised [`ApiError`] when the backend rejects the credentials.
pub async fn login<S, A>(store: &S, api: &A, request: &LoginRequest) -> Result<Session, ApiError>
where
    S: SessionStore + ?Sized,
    A: CloudApi + ?Sized,
{
    let response = api.login(request).await?;
    Ok(open(store, api, response))
}

/// Register, persist the session, and arm the API client with the new token.
///
/// # Errors
/// Returns the normalised [`ApiError`] when the backend rejects the account.
pub async fn register<S, A>(
    store: &S,
    api: &A,
    request: &RegisterRequest,
) -> Result<Session, ApiError>
where
    S: SessionStore + ?Sized,
    A: CloudApi + ?Sized,
{
    let response = api.register(request).await?;
    Ok(open(store, api, response))
}

/// Drop the session locally and disarm the API client.
pub fn logout<S, A>(store: &S, api: &A)
where
    S: SessionStore + ?Sized,
    A: CloudApi + ?Sized,
{
    store.clear();
    api.set_token(None);
}

fn open<S, A>(store: &S, api: &A, response: AuthResponse) -> Session
where
    S: SessionStore + ?Sized,
    A: CloudApi + ?Sized,
{
    let session = Session::from_auth(response);
    store.write(session.token(), session.user());
    api.set_token(Some(session.token().to_string()));
    session
}

/// In-memory [`SessionStore`] used by tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) stored: std::cell::RefCell<StoredSession>,
    pub(crate) clears: std::cell::Cell<u32>,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn with(token: Option<&str>, user: Option<&str>) -> Self {
        Self {
            stored: std::cell::RefCell::new(StoredSession {
                token: token.map(str::to_string),
                user: user.map(str::to_string),
            }),
            clears: std::cell::Cell::new(0),
        }
    }
}

#[cfg(test)]
impl SessionStore for MemoryStore {
    fn read(&self) -> StoredSession {
        self.stored.borrow().clone()
    }

    fn write(&self, token: &str, user: &User) {
        *self.stored.borrow_mut() = StoredSession {
            token: Some(token.to_string()),
            user: serde_json::to_string(user).ok(),
        };
    }

    fn clear(&self) {
        *self.stored.borrow_mut() = StoredSession::default();
        self.clears.set(self.clears.get() + 1);
    }
}
