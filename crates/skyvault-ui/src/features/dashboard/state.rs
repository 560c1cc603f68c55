//! Dashboard data and the values derived from it.

use crate::core::load::ScreenState;
use skyvault_api_models::format::{
    DEFAULT_QUOTA_BYTES, EM_DASH, format_timestamp, parse_timestamp, storage_percent,
};
use skyvault_api_models::{FileRecord, HistoryEntry, StorageSummary};
use std::cmp::Ordering;

/// Entries shown in the activity summary.
pub const ACTIVITY_PREVIEW: usize = 5;
/// Shown when the activity summary is empty.
pub const NO_RECENT_ACTIVITY: &str = "No recent activity.";

/// Result of the dashboard's combined fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    /// Aggregate storage usage.
    pub storage: StorageSummary,
    /// Every file the user owns.
    pub files: Vec<FileRecord>,
    /// Most recent activity.
    pub history: Vec<HistoryEntry>,
}

/// Values rendered by the dashboard cards.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardCards {
    /// "Total storage used" card.
    pub storage_used: String,
    /// "Files uploaded" card.
    pub files_uploaded: String,
    /// "Last upload" card.
    pub last_upload: String,
    /// "Recent activity count" card.
    pub activity_count: String,
    /// Storage bar fill, `0..=100`.
    pub storage_percent: f64,
}

impl DashboardData {
    /// Card values for this data set.
    #[must_use]
    pub fn cards(&self) -> DashboardCards {
        DashboardCards {
            storage_used: format!("{} MB", self.storage.total_mb),
            files_uploaded: self.files.len().to_string(),
            last_upload: last_upload(&self.files).map_or_else(
                || EM_DASH.to_string(),
                |file| format_timestamp(file.uploaded_at.as_deref()),
            ),
            activity_count: self.history.len().to_string(),
            storage_percent: storage_percent(self.storage.total_bytes, DEFAULT_QUOTA_BYTES),
        }
    }

    /// Entries for the activity summary list.
    #[must_use]
    pub fn recent_activity(&self) -> &[HistoryEntry] {
        let end = self.history.len().min(ACTIVITY_PREVIEW);
        &self.history[..end]
    }
}

/// Dashboard screen state.
pub type DashboardState = ScreenState<DashboardData>;

/// The most recently uploaded file.
///
/// Timestamps are compared as instants when both parse and as text otherwise;
/// files without a timestamp rank lowest.
#[must_use]
pub fn last_upload(files: &[FileRecord]) -> Option<&FileRecord> {
    files
        .iter()
        .max_by(|left, right| compare_uploaded(left.uploaded_at.as_deref(), right.uploaded_at.as_deref()))
}

fn compare_uploaded(left: Option<&str>, right: Option<&str>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => match (parse_timestamp(left), parse_timestamp(right)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => left.cmp(right),
        },
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{entry, file};

    #[test]
    fn last_upload_picks_greatest_timestamp() {
        let files = vec![
            file(1, "a", "2024-03-01T09:00:00"),
            file(2, "b", "2024-03-02T08:00:00.5"),
            file(3, "c", "2024-02-28T23:59:59"),
        ];
        assert_eq!(last_upload(&files).map(|file| file.id), Some(2));
    }

    #[test]
    fn last_upload_ignores_missing_timestamps() {
        let mut undated = file(9, "x", "");
        undated.uploaded_at = None;
        let files = vec![undated, file(4, "y", "2023-01-01T00:00:00")];
        assert_eq!(last_upload(&files).map(|file| file.id), Some(4));
        assert!(last_upload(&[]).is_none());
    }

    #[test]
    fn cards_summarise_data() {
        let data = DashboardData {
            storage: StorageSummary {
                total_bytes: DEFAULT_QUOTA_BYTES / 4,
                total_mb: 1280.0,
            },
            files: vec![file(1, "a", "2024-03-01T09:15:00")],
            history: (0..7).map(|id| entry(id, "upload", "a")).collect(),
        };
        let cards = data.cards();
        assert_eq!(cards.storage_used, "1280 MB");
        assert_eq!(cards.files_uploaded, "1");
        assert_eq!(cards.last_upload, "2024-03-01 09:15");
        assert_eq!(cards.activity_count, "7");
        assert!((cards.storage_percent - 25.0).abs() < 1e-9);
        assert_eq!(data.recent_activity().len(), ACTIVITY_PREVIEW);
    }

    #[test]
    fn empty_dashboard_uses_placeholders() {
        let cards = DashboardData::default().cards();
        assert_eq!(cards.last_upload, EM_DASH);
        assert_eq!(cards.files_uploaded, "0");
        assert!(DashboardData::default().recent_activity().is_empty());
    }
}
