//! Activity history: newest entries and the bulk clear.

pub mod controller;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::HistoryPage;
