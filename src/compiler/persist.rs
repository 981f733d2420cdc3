//! Persist stage: recreate the output directory and write every document.
//!
//! Nothing from a previous build survives. The output directory is removed,
//! the static tree is copied in, then each document is written to
//! `directory/file_name`. A failure part way leaves a partial output tree.

use crate::{
    config::SiteConfig, document::Document, error::BuildError, log, logger::StageProgress,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use walkdir::WalkDir;

/// Write the site. Returns the number of files written, static files included.
pub fn persist(docs: &[Document], config: &SiteConfig) -> Result<usize> {
    let output = &config.build.output;
    reset_dir(output)?;

    let copied = copy_static(&config.build.static_dir, &config.static_output_dir())?;

    let progress = StageProgress::start("persist", docs.len());
    for doc in docs {
        write_doc(doc)?;
        if let Some(progress) = &progress {
            progress.inc();
        }
    }

    Ok(copied + docs.len())
}

/// Remove `dir` if present and create it empty.
fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove `{}`", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("Failed to create `{}`", dir.display()))
}

/// Copy the static tree verbatim. Returns the number of files copied.
///
/// Symlinks are followed and empty directories are recreated. Nothing is
/// filtered out.
fn copy_static(source: &Path, dest: &Path) -> Result<usize> {
    if !source.is_dir() {
        return Err(BuildError::MissingStatic(source.to_path_buf()).into());
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk `{}`", source.display()))?;
        let target = dest.join(entry.path().strip_prefix(source)?);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create `{}`", target.display()))?;
            continue;
        }
        fs::copy(entry.path(), &target).with_context(|| {
            format!("Failed to copy `{}` to `{}`", entry.path().display(), target.display())
        })?;
        copied += 1;
    }

    log!("persist"; "copied {copied} static files");
    Ok(copied)
}

fn write_doc(doc: &Document) -> Result<()> {
    fs::create_dir_all(&doc.directory)
        .with_context(|| format!("Failed to create `{}`", doc.directory.display()))?;
    let path = doc.path();
    fs::write(&path, doc.content.as_bytes())
        .with_context(|| format!("Failed to write `{}`", path.display()))
}
