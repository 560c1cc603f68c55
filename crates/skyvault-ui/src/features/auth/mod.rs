//! Public pages and the sign-in/registration forms.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::{LandingPage, LoginPage, RegisterPage};
