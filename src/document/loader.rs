use super::{Content, DocKind, Document, Metadata, front_matter};
use crate::{compiler::collect_all_files, error::BuildError, log};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Load one document per file under `content_dir`.
///
/// Documents come back in walk order (file names sorted per directory), so
/// repeated builds see the same order. A missing content directory simply
/// yields no documents.
pub fn load_docs(content_dir: &Path) -> Result<Vec<Document>> {
    if !content_dir.is_dir() {
        log!("warn"; "content directory `{}` not found", content_dir.display());
        return Ok(Vec::new());
    }

    collect_all_files(content_dir)?
        .iter()
        .map(|path| load_doc(path))
        .collect()
}

fn load_doc(path: &Path) -> Result<Document> {
    let directory = path
        .parent()
        .with_context(|| format!("`{}` has no parent directory", path.display()))?
        .to_path_buf();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| BuildError::Encoding(path.to_path_buf()))?
        .to_owned();

    let kind = DocKind::from_file_name(&file_name);
    let bytes = fs::read(path).with_context(|| format!("Failed to read `{}`", path.display()))?;
    let (metadata, content) = match (kind, String::from_utf8(bytes)) {
        // passthrough files are written back exactly as read
        (DocKind::Passthrough, Ok(text)) => (Metadata::new(), Content::Text(text)),
        (DocKind::Passthrough, Err(e)) => (Metadata::new(), Content::Binary(e.into_bytes())),
        (_, Ok(text)) => {
            let (metadata, body) = front_matter::extract(&text, &file_name);
            (metadata, Content::Text(body.to_owned()))
        }
        (_, Err(_)) => return Err(BuildError::Encoding(path.to_path_buf()).into()),
    };

    Ok(Document::new(directory, file_name, metadata, content))
}
