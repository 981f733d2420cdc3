//! Version history lookups.
//!
//! The build only needs one thing from history: the author date of the last
//! commit that touched a file. [`History`] abstracts that so the pipeline can
//! run against git, against nothing, or against a fixed table in tests.

use crate::{error::BuildError, exec};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Source of last-modified timestamps.
pub trait History {
    /// Raw timestamp text for the last commit touching `path`, in
    /// `git log --date=default` layout. `None` when the file has no history.
    fn last_modified(&self, path: &Path) -> Result<Option<String>>;
}

/// Asks git, running from the site root.
pub struct GitHistory {
    root: PathBuf,
    command: Vec<String>,
}

impl GitHistory {
    pub fn new(root: &Path, command: &[String]) -> Self {
        Self {
            root: root.to_path_buf(),
            command: command.to_vec(),
        }
    }
}

impl History for GitHistory {
    fn last_modified(&self, path: &Path) -> Result<Option<String>> {
        let output = exec!(
            self.root.as_path();
            &self.command;
            "log", "-1", "--date=default", "--format=%ad", "--", path
        )
        .map_err(|err| BuildError::History {
            path: path.to_path_buf(),
            message: format!("{err:#}"),
        })?;

        Ok(parse_log_output(&output.stdout))
    }
}

/// Used when `[build.history]` is disabled: nothing is ever tracked.
pub struct NoHistory;

impl History for NoHistory {
    fn last_modified(&self, _path: &Path) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Trim `git log` output down to the timestamp, tolerating a quoted format.
fn parse_log_output(stdout: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim().trim_matches('"').trim();
    (!text.is_empty()).then(|| text.to_owned())
}
