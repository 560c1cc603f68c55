//! Transport-agnostic API seam used by the session and screen controllers.
//!
//! # Design
//! - Controllers only see this trait, so they run natively in tests against
//!   an in-memory fake and in the browser against the `gloo-net` client.
//! - The bearer token lives inside the implementation; callers swap it with
//!   [`CloudApi::set_token`] when the session changes.
//! - Uploads are not part of the seam because the file handle type is
//!   platform specific; the upload workflow receives an injected function.

use async_trait::async_trait;
use skyvault_api_models::{
    AdminStats, AdminUser, ApiError, AuthResponse, ClearHistoryAck, FileRecord, HistoryEntry,
    LoginRequest, RegisterRequest, StorageSummary, User,
};

/// File content fetched from the download endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Name taken from the `Content-Disposition` hint.
    pub filename: String,
    /// MIME type reported by the server, if any.
    pub content_type: Option<String>,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// REST operations the web client consumes.
#[async_trait(?Send)]
pub trait CloudApi {
    /// Replace the bearer token attached to authenticated requests.
    fn set_token(&self, token: Option<String>);

    /// Exchange credentials for a session.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// Create an account and open a session for it.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    /// Resolve the user behind the current token.
    async fn me(&self) -> Result<User, ApiError>;

    /// Most recent activity entries, newest first.
    async fn history(&self, limit: u32) -> Result<Vec<HistoryEntry>, ApiError>;

    /// Remove every activity entry for the current user.
    async fn clear_history(&self) -> Result<ClearHistoryAck, ApiError>;

    /// Files owned by the current user.
    async fn list_files(&self) -> Result<Vec<FileRecord>, ApiError>;

    /// Aggregate storage usage for the current user.
    async fn storage(&self) -> Result<StorageSummary, ApiError>;

    /// Fetch a file's content.
    async fn download_file(&self, id: i64) -> Result<DownloadedFile, ApiError>;

    /// Delete a file.
    async fn delete_file(&self, id: i64) -> Result<(), ApiError>;

    /// Global counters (admin only, enforced server-side).
    async fn admin_stats(&self) -> Result<AdminStats, ApiError>;

    /// Every registered account (admin only, enforced server-side).
    async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError>;
}
