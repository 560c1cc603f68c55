//! Persistence and environment helpers for the app shell.

use crate::core::session::{SessionStore, StoredSession};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use skyvault_api_models::User;

pub(crate) const TOKEN_KEY: &str = "skyvault.token";
pub(crate) const USER_KEY: &str = "skyvault.user";
pub(crate) const API_URL_KEY: &str = "skyvault.api_url";

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Resolve the backend base URL once per boot.
pub(crate) fn api_base_url() -> String {
    if let Some(url) = option_env!("SKYVAULT_API_URL").filter(|url| !url.trim().is_empty()) {
        return url.to_string();
    }
    read_raw(API_URL_KEY)
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Session persistence backed by `localStorage`.
///
/// Values are stored as plain strings: the token verbatim and the user as a
/// JSON document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn read(&self) -> StoredSession {
        StoredSession {
            token: read_raw(TOKEN_KEY),
            user: read_raw(USER_KEY),
        }
    }

    fn write(&self, token: &str, user: &User) {
        write_raw(TOKEN_KEY, token);
        match serde_json::to_string(user) {
            Ok(json) => write_raw(USER_KEY, &json),
            Err(err) => log_storage_error("encode", USER_KEY, &err.to_string()),
        }
    }

    fn clear(&self) {
        let storage = LocalStorage::raw();
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = storage.remove_item(key) {
                log_storage_error("remove", key, &format!("{err:?}"));
            }
        }
    }
}

fn read_raw(key: &str) -> Option<String> {
    LocalStorage::raw().get_item(key).ok().flatten()
}

fn write_raw(key: &'static str, value: &str) {
    if let Err(err) = LocalStorage::raw().set_item(key, value) {
        log_storage_error("set", key, &format!("{err:?}"));
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
