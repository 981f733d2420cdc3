//! Documents flowing through the build pipeline.
//!
//! One `Document` exists per file under the content root. It is created by
//! the loader and then mutated in place, stage by stage:
//!
//! ```text
//!              directory            file_name     content
//! load         content/blog         post.md       raw markdown
//! annotate     content/blog         post.md       raw markdown   (+ last_modified)
//! render       content/blog         post.html     page layout output
//! prepare      build/blog/post      index.html    page layout output
//! ```

mod front_matter;
mod loader;
mod meta;

pub use loader::load_docs;
pub use meta::{MetaValue, Metadata};

use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// How a document is rendered, decided once from its source file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    /// `*.md`: converted to HTML and wrapped in the page layout
    Markdown,
    /// `*.jinja2`: the body is itself a template
    Template,
    /// Anything else: written out untouched
    Passthrough,
}

impl DocKind {
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.ends_with(".md") {
            Self::Markdown
        } else if file_name.ends_with(".jinja2") {
            Self::Template
        } else {
            Self::Passthrough
        }
    }

    /// Suffix replaced by `.html` when rendering.
    pub const fn source_suffix(self) -> Option<&'static str> {
        match self {
            Self::Markdown => Some(".md"),
            Self::Template => Some(".jinja2"),
            Self::Passthrough => None,
        }
    }
}

/// Document body. Only passthrough files may hold non-UTF-8 bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }
}

/// Templates see text as a string and binary bodies as `null`.
impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Binary(_) => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Directory the document currently lives in (content, then output)
    pub directory: PathBuf,
    pub file_name: String,
    #[serde(skip)]
    pub kind: DocKind,
    pub metadata: Metadata,
    pub content: Content,
}

impl Document {
    pub fn new(directory: PathBuf, file_name: String, metadata: Metadata, content: Content) -> Self {
        let kind = DocKind::from_file_name(&file_name);
        Self {
            directory,
            file_name,
            kind,
            metadata,
            content,
        }
    }

    /// Current full path: `directory/file_name`.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}
