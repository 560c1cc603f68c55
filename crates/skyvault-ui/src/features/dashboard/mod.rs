//! Dashboard feature slice: storage usage, summary cards, recent activity.

pub mod controller;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::DashboardPage;
