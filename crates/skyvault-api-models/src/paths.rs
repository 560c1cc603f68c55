//! Endpoint paths relative to the API base URL.

/// `POST` credentials, returns an [`crate::AuthResponse`].
pub const LOGIN: &str = "/api/auth/login";
/// `POST` a new account, returns an [`crate::AuthResponse`].
pub const REGISTER: &str = "/api/auth/register";
/// `GET` the user behind the bearer token.
pub const ME: &str = "/api/auth/me";
/// `DELETE` the caller's activity log.
pub const HISTORY_CLEAR: &str = "/api/auth/history/clear";
/// `GET` the caller's files.
pub const FILES: &str = "/api/files/";
/// `GET` the caller's storage summary.
pub const STORAGE: &str = "/api/files/storage";
/// `POST` a multipart upload (field `file`).
pub const UPLOAD: &str = "/api/files/upload";
/// `GET` global admin counters.
pub const ADMIN_STATS: &str = "/api/admin/stats";
/// `GET` every registered account.
pub const ADMIN_USERS: &str = "/api/admin/users";

/// Multipart field name the upload endpoint reads.
pub const UPLOAD_FIELD: &str = "file";

/// History entries fetched by the history screen.
pub const HISTORY_PAGE_LIMIT: u32 = 50;
/// History entries fetched by the dashboard.
pub const DASHBOARD_HISTORY_LIMIT: u32 = 10;

/// `GET` the most recent `limit` activity entries.
#[must_use]
pub fn history(limit: u32) -> String {
    format!("/api/auth/history?limit={limit}")
}

/// `GET` a file's content.
#[must_use]
pub fn download(id: i64) -> String {
    format!("/api/files/{id}/download")
}

/// `DELETE` a file.
#[must_use]
pub fn file(id: i64) -> String {
    format!("/api/files/{id}")
}

/// Join a base URL and an endpoint path without doubling slashes.
#[must_use]
pub fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
