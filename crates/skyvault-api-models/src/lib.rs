#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the SkyVault storage API.
//!
//! These types are re-used by the web UI and the CLI for request/response
//! encoding so both clients agree on a single wire contract. Error bodies are
//! normalised in [`problem`], endpoint paths live in [`paths`], and the small
//! display helpers both clients render with live in [`format`].

use serde::{Deserialize, Serialize};

pub mod format;
pub mod paths;
pub mod problem;

pub use problem::{ApiError, error_message, fallback};

/// Account record returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Server-assigned user identifier.
    pub id: i64,
    /// Login email address.
    pub email: String,
    /// Optional display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Whether the backend grants admin endpoints to this user.
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    /// Name to show in chrome, falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password, only ever sent over the wire.
    pub password: String,
}

/// Payload posted to the registration endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Optional display name; serialised as `null` when absent.
    pub full_name: Option<String>,
}

impl RegisterRequest {
    /// Build a request, mapping a blank name to `None`.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>, full_name: &str) -> Self {
        let trimmed = full_name.trim();
        Self {
            email: email.into(),
            password: password.into(),
            full_name: if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            },
        }
    }
}

/// Token issued by login/register.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token scheme, always `bearer` today.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// The authenticated account.
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Stored file metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    /// Server-assigned file identifier.
    pub id: i64,
    /// Name the file was uploaded with.
    pub original_filename: String,
    /// Size in bytes.
    #[serde(default)]
    pub size_bytes: u64,
    /// ISO-8601 upload timestamp.
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

/// Coarse classification of a history action, used for icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// A file was uploaded.
    Upload,
    /// A file was downloaded.
    Download,
    /// A file was deleted.
    Delete,
}

impl ActionKind {
    /// Classify a raw action string by substring; unknown actions read as uploads.
    #[must_use]
    pub fn classify(action: &str) -> Self {
        let lowered = action.to_ascii_lowercase();
        if lowered.contains("upload") {
            Self::Upload
        } else if lowered.contains("download") {
            Self::Download
        } else if lowered.contains("delete") {
            Self::Delete
        } else {
            Self::Upload
        }
    }

    /// Stable lowercase name, used as a CSS modifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Delete => "delete",
        }
    }
}

/// One row of the per-user activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Server-assigned entry identifier.
    pub id: i64,
    /// Raw action name (`upload`, `download`, `delete`).
    pub action: String,
    /// File the action applied to, if still known.
    #[serde(default)]
    pub filename: Option<String>,
    /// ISO-8601 timestamp of the action.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl HistoryEntry {
    /// Icon classification for this entry.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        ActionKind::classify(&self.action)
    }
}

/// Aggregate storage usage for the current user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageSummary {
    /// Total stored bytes.
    pub total_bytes: u64,
    /// Total stored mebibytes, rounded to two decimals by the server.
    pub total_mb: f64,
}

/// Acknowledgement returned by the clear-history endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ClearHistoryAck {
    /// Whether the server removed the entries.
    #[serde(default)]
    pub cleared: bool,
}

/// Global counters for the admin overview.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AdminStats {
    /// Registered accounts.
    pub total_users: u64,
    /// Stored files across all accounts.
    pub total_files: u64,
    /// Stored bytes across all accounts, when reported.
    #[serde(default)]
    pub total_storage_bytes: Option<u64>,
    /// Stored mebibytes across all accounts.
    pub total_storage_mb: f64,
    /// Activity log rows across all accounts.
    pub recent_activities: u64,
}

/// Account row in the admin user list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminUser {
    /// Server-assigned user identifier.
    pub id: i64,
    /// Login email address.
    pub email: String,
    /// Optional display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Whether the account is an administrator.
    #[serde(default)]
    pub is_admin: bool,
    /// ISO-8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}
