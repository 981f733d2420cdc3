//! Document pipeline stages.
//!
//! - **meta**: inject last-modified metadata from version history
//! - **pages**: render markdown and template documents
//! - **prepare**: move documents to their output locations
//! - **persist**: recreate the output directory and write everything
//!
//! # Build Flow
//!
//! ```text
//! load_docs() ──► annotate() ──► render() ──► prepare() ──► persist()
//!      │              │             │             │              │
//!      ▼              ▼             ▼             ▼              ▼
//!  Document[]    +metadata     content/.html   build paths    files on disk
//! ```

mod markdown;
pub mod meta;
pub mod pages;
pub mod persist;
mod template;

pub use markdown::MarkdownRenderer;
pub use meta::annotate;
pub use pages::{PageRenderer, render};
pub use persist::persist;
pub use template::Templates;

use crate::{config::PathResolver, document::Document};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files under `dir`, sorted by file name at every level.
///
/// Symlinks are followed; a link is reported at its own path.
pub fn collect_all_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk `{}`", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&name) {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Move every document from its content location to its output location.
///
/// Must run after [`render`], which finalizes the `.html` names the pretty
/// URL transform keys on.
pub fn prepare(docs: &mut [Document], paths: PathResolver<'_>) -> Result<()> {
    for doc in docs {
        let (directory, file_name) = paths.resolve(&doc.directory, &doc.file_name)?;
        doc.directory = directory;
        doc.file_name = file_name;
    }
    Ok(())
}
