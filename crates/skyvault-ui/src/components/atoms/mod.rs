//! Shared UI atoms used across the shell and views.

pub(crate) mod activity;
pub(crate) mod empty_state;
pub(crate) mod spinner;
pub(crate) mod storage_bar;

pub(crate) use activity::ActivityItem;
pub(crate) use empty_state::EmptyState;
pub(crate) use spinner::{ErrorMessage, Spinner};
pub(crate) use storage_bar::{CardIcon, DashboardCard, StorageBar};
