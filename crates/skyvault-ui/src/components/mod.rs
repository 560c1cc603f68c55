pub(crate) mod atoms;
pub(crate) mod shell;
