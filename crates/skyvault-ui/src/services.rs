//! Browser transport for the API seam.

pub(crate) mod api;
