//! Command handlers grouped by concern.

use std::io::{self, BufRead, Write};

use anyhow::anyhow;

use crate::client::{CliError, CliResult};

pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod files;
pub(crate) mod history;

/// Ask for a yes/no confirmation on stderr; `assume_yes` skips the prompt.
///
/// Only `y` or `yes` (any case) confirms. End of input declines.
pub(crate) fn confirm(prompt: &str, assume_yes: bool, input: &mut dyn BufRead) -> CliResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    eprint!("{prompt} [y/N] ");
    io::stderr()
        .flush()
        .map_err(|err| CliError::failure(anyhow!("failed to write prompt: {err}")))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|err| CliError::failure(anyhow!("failed to read confirmation: {err}")))?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_accepts_only_explicit_yes() {
        assert!(confirm("Delete?", false, &mut "y\n".as_bytes()).expect("read"));
        assert!(confirm("Delete?", false, &mut "YES\n".as_bytes()).expect("read"));
        assert!(!confirm("Delete?", false, &mut "n\n".as_bytes()).expect("read"));
        assert!(!confirm("Delete?", false, &mut "".as_bytes()).expect("read"));
    }

    #[test]
    fn assume_yes_skips_reading() {
        assert!(confirm("Delete?", true, &mut "no\n".as_bytes()).expect("read"));
    }
}
