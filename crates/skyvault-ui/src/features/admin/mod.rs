//! Admin overview: global counters and the account list.

pub mod controller;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::AdminPage;
