//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use serde::Serialize;
use skyvault_api_models::format::{
    DEFAULT_QUOTA_BYTES, EM_DASH, format_gigabytes, format_megabytes, format_size,
    format_timestamp, storage_percent,
};
use skyvault_api_models::{AdminStats, AdminUser, FileRecord, HistoryEntry, StorageSummary, User};

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn render_user(user: &User, format: OutputFormat) -> CliResult<()> {
    emit(user, format, || user_table(user))
}

pub(crate) fn render_files(files: &[FileRecord], format: OutputFormat) -> CliResult<()> {
    emit(files, format, || files_table(files))
}

pub(crate) fn render_file(file: &FileRecord, format: OutputFormat) -> CliResult<()> {
    emit(file, format, || {
        format!(
            "Uploaded {} (id: {}, {})\n",
            file.original_filename,
            file.id,
            format_size(file.size_bytes)
        )
    })
}

pub(crate) fn render_storage(summary: &StorageSummary, format: OutputFormat) -> CliResult<()> {
    emit(summary, format, || storage_table(summary))
}

pub(crate) fn render_history(entries: &[HistoryEntry], format: OutputFormat) -> CliResult<()> {
    emit(entries, format, || history_table(entries))
}

pub(crate) fn render_admin_stats(stats: &AdminStats, format: OutputFormat) -> CliResult<()> {
    emit(stats, format, || admin_stats_table(stats))
}

pub(crate) fn render_admin_users(users: &[AdminUser], format: OutputFormat) -> CliResult<()> {
    emit(users, format, || admin_users_table(users))
}

fn emit<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    table: impl FnOnce() -> String,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(value)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            println!("{text}");
        }
        OutputFormat::Table => print!("{}", table()),
    }
    Ok(())
}

fn user_table(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id: {}", user.id);
    let _ = writeln!(out, "email: {}", user.email);
    let _ = writeln!(out, "name: {}", user.full_name.as_deref().unwrap_or(EM_DASH));
    let _ = writeln!(out, "admin: {}", yes_no(user.is_admin));
    out
}

pub(crate) fn files_table(files: &[FileRecord]) -> String {
    if files.is_empty() {
        return "No files uploaded yet.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:>6} {:>10} {:<16} NAME", "ID", "SIZE", "UPLOADED");
    for file in files {
        let _ = writeln!(
            out,
            "{:>6} {:>10} {:<16} {}",
            file.id,
            format_size(file.size_bytes),
            format_timestamp(file.uploaded_at.as_deref()),
            file.original_filename
        );
    }
    out
}

pub(crate) fn storage_table(summary: &StorageSummary) -> String {
    format!(
        "used: {} MB of {} GB ({:.1}%)\n",
        format_megabytes(summary.total_bytes),
        format_gigabytes(DEFAULT_QUOTA_BYTES),
        storage_percent(summary.total_bytes, DEFAULT_QUOTA_BYTES)
    )
}

pub(crate) fn history_table(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No activity yet.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:<16} {:<10} FILE", "WHEN", "ACTION");
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<16} {:<10} {}",
            format_timestamp(entry.created_at.as_deref()),
            entry.action,
            entry.filename.as_deref().unwrap_or(EM_DASH)
        );
    }
    out
}

fn admin_stats_table(stats: &AdminStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "users: {}", stats.total_users);
    let _ = writeln!(out, "files: {}", stats.total_files);
    let _ = writeln!(out, "storage: {:.2} MB", stats.total_storage_mb);
    let _ = writeln!(out, "activities: {}", stats.recent_activities);
    out
}

pub(crate) fn admin_users_table(users: &[AdminUser]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>6} {:<32} {:<20} {:<5} CREATED", "ID", "EMAIL", "NAME", "ADMIN");
    for user in users {
        let _ = writeln!(
            out,
            "{:>6} {:<32} {:<20} {:<5} {}",
            user.id,
            user.email,
            user.full_name.as_deref().unwrap_or(EM_DASH),
            yes_no(user.is_admin),
            format_timestamp(user.created_at.as_deref())
        );
    }
    out
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_table_formats_sizes_and_dates() {
        let table = files_table(&[FileRecord {
            id: 3,
            original_filename: "notes.txt".to_string(),
            size_bytes: 1536,
            uploaded_at: Some("2024-03-01T09:30:00Z".to_string()),
        }]);
        let row = table.lines().nth(1).expect("row");
        assert!(row.contains("1.5 KB"));
        assert!(row.contains("2024-03-01 09:30"));
        assert!(row.ends_with("notes.txt"));
    }

    #[test]
    fn empty_lists_print_a_hint() {
        assert_eq!(files_table(&[]), "No files uploaded yet.\n");
        assert_eq!(history_table(&[]), "No activity yet.\n");
    }

    #[test]
    fn history_rows_use_dash_for_missing_values() {
        let table = history_table(&[HistoryEntry {
            id: 1,
            action: "delete".to_string(),
            filename: None,
            created_at: None,
        }]);
        let row = table.lines().nth(1).expect("row");
        assert!(row.starts_with(EM_DASH));
        assert!(row.contains("delete"));
    }

    #[test]
    fn storage_line_reports_share_of_quota() {
        let line = storage_table(&StorageSummary {
            total_bytes: DEFAULT_QUOTA_BYTES / 4,
            total_mb: 1280.0,
        });
        assert_eq!(line, "used: 1280.00 MB of 5.0 GB (25.0%)\n");
    }

    #[test]
    fn admin_users_mark_administrators() {
        let table = admin_users_table(&[AdminUser {
            id: 1,
            email: "root@example.com".to_string(),
            full_name: None,
            is_admin: true,
            created_at: Some("2024-01-02T03:04:05".to_string()),
        }]);
        let row = table.lines().nth(1).expect("row");
        assert!(row.contains("yes"));
        assert!(row.ends_with("2024-01-02 03:04"));
    }
}
