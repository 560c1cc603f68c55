//! File list: load, download, delete, and upload entry points.

pub mod controller;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::FilesPage;
