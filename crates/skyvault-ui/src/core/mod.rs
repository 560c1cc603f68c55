//! Core, DOM-free primitives and helpers for the Web UI.
pub mod api;
pub mod load;
pub mod routes;
pub mod session;
pub mod store;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;
