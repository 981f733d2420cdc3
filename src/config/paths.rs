//! Output path resolution for documents.
//!
//! # Architecture
//!
//! ```text
//! SiteConfig
//!     │
//!     └── paths() → PathResolver
//!                       │
//!                       ├── output_dir()   content/blog      → build/blog
//!                       ├── pretty_url()   (dir, post.html)  → (dir/post, index.html)
//!                       └── resolve()      both of the above
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let paths = config.paths();
//! let (dir, name) = paths.resolve(&doc.directory, &doc.file_name)?;
//! ```

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

/// Suffix that triggers the pretty URL transform.
const HTML_SUFFIX: &str = ".html";

/// File name every pretty URL resolves to.
pub const INDEX_HTML: &str = "index.html";

/// Maps content locations to build locations.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    /// Content root (source prefix)
    content: &'a Path,
    /// Output root (replacement prefix)
    output: &'a Path,
}

impl<'a> PathResolver<'a> {
    #[inline]
    pub const fn new(content: &'a Path, output: &'a Path) -> Self {
        Self { content, output }
    }

    /// Substitute the content-root prefix of `directory` with the output root.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // content: /site/content, output: /site/build
    /// paths.output_dir("/site/content/blog") → "/site/build/blog"
    /// ```
    pub fn output_dir(&self, directory: &Path) -> Result<PathBuf> {
        let relative = directory.strip_prefix(self.content).map_err(|_| {
            anyhow!(
                "`{}` is not inside the content directory `{}`",
                directory.display(),
                self.content.display()
            )
        })?;
        Ok(self.output.join(relative))
    }

    /// Apply the pretty URL convention: `name.html` → `name/index.html`.
    ///
    /// `index.html` and anything not ending in `.html` stay where they are.
    pub fn pretty_url(directory: &Path, file_name: &str) -> (PathBuf, String) {
        match file_name.strip_suffix(HTML_SUFFIX) {
            Some(stem) if file_name != INDEX_HTML => {
                (directory.join(stem), INDEX_HTML.to_owned())
            }
            _ => (directory.to_path_buf(), file_name.to_owned()),
        }
    }

    /// Final output location of a rendered document.
    pub fn resolve(&self, directory: &Path, file_name: &str) -> Result<(PathBuf, String)> {
        let directory = self.output_dir(directory)?;
        Ok(Self::pretty_url(&directory, file_name))
    }
}
