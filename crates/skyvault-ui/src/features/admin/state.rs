//! Admin overview data.

use crate::core::load::ScreenState;
use skyvault_api_models::format::{EM_DASH, format_timestamp};
use skyvault_api_models::{AdminStats, AdminUser};

/// Counters and accounts shown on the admin screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminData {
    /// Global counters.
    pub stats: AdminStats,
    /// Every registered account.
    pub users: Vec<AdminUser>,
}

/// Admin screen state.
pub type AdminState = ScreenState<AdminData>;

/// One rendered row of the user table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    /// Account id.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Display name or a dash.
    pub name: String,
    /// "Admin" or "User".
    pub role: &'static str,
    /// Creation time or a dash.
    pub created: String,
}

impl From<&AdminUser> for UserRow {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user
                .full_name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(EM_DASH)
                .to_string(),
            role: if user.is_admin { "Admin" } else { "User" },
            created: format_timestamp(user.created_at.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_fill_missing_fields_with_dashes() {
        let row = UserRow::from(&AdminUser {
            id: 3,
            email: "ops@example.com".into(),
            full_name: None,
            is_admin: true,
            created_at: None,
        });
        assert_eq!(row.name, EM_DASH);
        assert_eq!(row.created, EM_DASH);
        assert_eq!(row.role, "Admin");
    }

    #[test]
    fn rows_render_known_fields() {
        let row = UserRow::from(&AdminUser {
            id: 4,
            email: "jo@example.com".into(),
            full_name: Some("Jo".into()),
            is_admin: false,
            created_at: Some("2024-05-06T07:08:09".into()),
        });
        assert_eq!(row.name, "Jo");
        assert_eq!(row.role, "User");
        assert_eq!(row.created, "2024-05-06 07:08");
    }
}
