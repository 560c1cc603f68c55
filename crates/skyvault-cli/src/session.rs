//! The signed-in session, kept as a small JSON file between invocations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use skyvault_api_models::User;

use crate::client::{CliError, CliResult};

const SESSION_DIR: &str = ".skyvault";
const SESSION_FILE: &str = "session.json";
const FALLBACK_FILE: &str = ".skyvault-session.json";

/// Token plus the user snapshot it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct StoredSession {
    pub(crate) token: String,
    pub(crate) user: User,
}

/// Outcome of reading the session file.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SessionRead {
    Missing,
    /// The file exists but does not hold a usable session.
    Corrupted,
    Present(StoredSession),
}

#[derive(Debug, Clone)]
pub(crate) struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub(crate) const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `$HOME/.skyvault/session.json`, or a file in the working directory
    /// when no home directory is known.
    pub(crate) fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map_or_else(
                || PathBuf::from(FALLBACK_FILE),
                |home| PathBuf::from(home).join(SESSION_DIR).join(SESSION_FILE),
            )
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn read(&self) -> CliResult<SessionRead> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(SessionRead::Missing),
            Err(err) => {
                return Err(CliError::failure(anyhow!(
                    "failed to read session file '{}': {err}",
                    self.path.display()
                )));
            }
        };
        Ok(match serde_json::from_slice::<StoredSession>(&raw) {
            Ok(stored) if !stored.token.trim().is_empty() => SessionRead::Present(stored),
            Ok(_) | Err(_) => SessionRead::Corrupted,
        })
    }

    pub(crate) fn write(&self, session: &StoredSession) -> CliResult<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                CliError::failure(anyhow!(
                    "failed to create session directory '{}': {err}",
                    parent.display()
                ))
            })?;
        }
        let text = serde_json::to_vec_pretty(session)
            .map_err(|err| CliError::failure(anyhow!("failed to encode session: {err}")))?;
        fs::write(&self.path, text).map_err(|err| {
            CliError::failure(anyhow!(
                "failed to write session file '{}': {err}",
                self.path.display()
            ))
        })?;
        restrict_permissions(&self.path)
    }

    /// Remove the file; an absent file is already cleared.
    pub(crate) fn clear(&self) -> CliResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CliError::failure(anyhow!(
                "failed to remove session file '{}': {err}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> CliResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|err| {
        CliError::failure(anyhow!(
            "failed to restrict session file '{}': {err}",
            path.display()
        ))
    })
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn restrict_permissions(_path: &Path) -> CliResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StoredSession {
        StoredSession {
            token: "tok-1".to_string(),
            user: User {
                id: 7,
                email: "ada@example.com".to_string(),
                full_name: Some("Ada".to_string()),
                is_admin: false,
            },
        }
    }

    #[test]
    fn absent_file_reads_as_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = SessionFile::new(dir.path().join("session.json"));
        assert_eq!(file.read().expect("read"), SessionRead::Missing);
        file.clear().expect("clearing a missing file succeeds");
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = SessionFile::new(dir.path().join("nested").join("session.json"));
        file.write(&sample()).expect("write");
        assert_eq!(file.read().expect("read"), SessionRead::Present(sample()));

        file.clear().expect("clear");
        assert_eq!(file.read().expect("read"), SessionRead::Missing);
    }

    #[test]
    fn garbage_and_blank_tokens_are_corrupted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let file = SessionFile::new(path.clone());

        fs::write(&path, b"{not json").expect("seed");
        assert_eq!(file.read().expect("read"), SessionRead::Corrupted);

        fs::write(&path, br#"{"token":"abc"}"#).expect("seed");
        assert_eq!(file.read().expect("read"), SessionRead::Corrupted);

        let mut blank = sample();
        blank.token = "  ".to_string();
        file.write(&blank).expect("write");
        assert_eq!(file.read().expect("read"), SessionRead::Corrupted);
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let file = SessionFile::new(dir.path().join("session.json"));
        file.write(&sample()).expect("write");
        let mode = fs::metadata(file.path()).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
