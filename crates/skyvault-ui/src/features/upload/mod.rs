//! Upload workflow: state machine, sequencing controller, and modal.

pub mod controller;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::UploadModal;
