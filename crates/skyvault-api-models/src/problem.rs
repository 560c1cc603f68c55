//! Error-body normalisation and the client-side error taxonomy.
//!
//! # Design
//! - The backend reports failures as `{"detail": ...}` where `detail` is either a
//!   plain string or a list of validation issues carrying `msg` and `loc`.
//! - Clients only ever need one human-readable line, so every shape collapses
//!   into a `String` with a per-operation fallback.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Per-operation fallback messages.
pub mod fallback {
    /// Login rejected.
    pub const LOGIN: &str = "Login failed";
    /// Registration rejected.
    pub const REGISTER: &str = "Registration failed";
    /// Token validation failed.
    pub const ME: &str = "Not authenticated";
    /// File list could not be loaded.
    pub const FILES: &str = "Failed to fetch files";
    /// Storage summary could not be loaded.
    pub const STORAGE: &str = "Failed to fetch storage";
    /// Upload rejected.
    pub const UPLOAD: &str = "Upload failed";
    /// Download rejected.
    pub const DOWNLOAD: &str = "Download failed";
    /// Delete rejected.
    pub const DELETE: &str = "Delete failed";
    /// History could not be loaded.
    pub const HISTORY: &str = "Failed to fetch history";
    /// History could not be cleared.
    pub const CLEAR_HISTORY: &str = "Failed to clear history";
    /// Admin counters rejected (usually a permission failure).
    pub const ADMIN_STATS: &str = "Admin access required";
    /// Admin user list rejected.
    pub const ADMIN_USERS: &str = "Failed to fetch users";
}

/// Failure surfaced by an API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection, CORS, timeout).
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Normalised, human-readable message.
        message: String,
    },
    /// A 2xx response body did not match the expected shape.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a raw response body.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8], fallback: &str) -> Self {
        Self::Status {
            status,
            message: error_message(body, fallback),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "known_detail")]
    detail: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Issues(Vec<ValidationIssue>),
}

/// `detail` in any shape other than a string or an issue list counts as absent.
fn known_detail<'de, D>(deserializer: D) -> Result<Option<ErrorDetail>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| ErrorDetail::deserialize(value).ok()))
}

#[derive(Deserialize)]
struct ValidationIssue {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    loc: Vec<Value>,
}

impl ValidationIssue {
    fn describe(&self) -> Option<String> {
        if let Some(msg) = self.msg.as_deref().filter(|msg| !msg.trim().is_empty()) {
            return Some(msg.to_string());
        }
        let parts: Vec<String> = self
            .loc
            .iter()
            .map(|segment| match segment {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Extract a human-readable message from an error response body.
///
/// Returns `fallback` when the body is not JSON or carries no usable detail.
#[must_use]
pub fn error_message(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| describe(&parsed))
        .unwrap_or_else(|| fallback.to_string())
}

fn describe(body: &ErrorBody) -> Option<String> {
    let from_detail = match &body.detail {
        Some(ErrorDetail::Message(text)) if !text.trim().is_empty() => Some(text.clone()),
        Some(ErrorDetail::Issues(issues)) => issues.first().and_then(ValidationIssue::describe),
        Some(ErrorDetail::Message(_)) | None => None,
    };
    from_detail.or_else(|| {
        body.message
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let body = br#"{"detail":"Email already registered"}"#;
        assert_eq!(
            error_message(body, fallback::REGISTER),
            "Email already registered"
        );
    }

    #[test]
    fn validation_list_uses_first_msg() {
        let body = br#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"},{"msg":"second"}]}"#;
        assert_eq!(
            error_message(body, fallback::REGISTER),
            "value is not a valid email address"
        );
    }

    #[test]
    fn validation_list_without_msg_joins_location() {
        let body = br#"{"detail":[{"loc":["body","password",0]}]}"#;
        assert_eq!(error_message(body, fallback::LOGIN), "body password 0");
    }

    #[test]
    fn unknown_detail_shape_defers_to_message() {
        let body = br#"{"detail":{"code":7},"message":"quota exceeded"}"#;
        assert_eq!(error_message(body, fallback::UPLOAD), "quota exceeded");
    }

    #[test]
    fn message_field_is_secondary() {
        let body = br#"{"message":"maintenance window"}"#;
        assert_eq!(error_message(body, fallback::FILES), "maintenance window");
    }

    #[test]
    fn unusable_bodies_fall_back() {
        assert_eq!(error_message(b"", fallback::UPLOAD), "Upload failed");
        assert_eq!(error_message(b"<html>502</html>", fallback::UPLOAD), "Upload failed");
        assert_eq!(error_message(br#"{"detail":[]}"#, fallback::UPLOAD), "Upload failed");
        assert_eq!(error_message(br#"{"detail":42}"#, fallback::STORAGE), "Failed to fetch storage");
    }

    #[test]
    fn from_response_keeps_status_and_detail() {
        let err = ApiError::from_response(401, br#"{"detail":"Invalid token"}"#, fallback::ME);
        assert_eq!(
            err,
            ApiError::Status {
                status: 401,
                message: "Invalid token".into(),
            }
        );
        assert_eq!(err.to_string(), "Invalid token");
        assert_eq!(
            ApiError::from_response(403, b"", fallback::ADMIN_STATS).to_string(),
            "Admin access required"
        );
    }
}
