//! Screen slices. Each keeps DOM-free `state` and `controller` modules beside
//! a wasm-only `view`.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod files;
pub mod history;
pub mod upload;
