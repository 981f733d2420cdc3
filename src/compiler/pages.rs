//! Render stage: markdown and template documents become HTML.
//!
//! # Build context
//!
//! Every template sees two variables:
//!
//! | Variable  | Contents                                             |
//! |-----------|------------------------------------------------------|
//! | `context` | `{ data: {name: [row]}, docs: [document] }`          |
//! | `doc`     | the document being rendered, in its current state    |
//!
//! `context` is a snapshot taken before the first document is rendered, so
//! `context.docs` always holds pre-render content and source file names,
//! whatever the render order. `doc` is live: for markdown it already holds
//! the converted HTML and the `.html` name.

use super::{markdown::MarkdownRenderer, template::Templates};
use crate::{
    data::Datasets,
    document::{Content, DocKind, Document},
    error::BuildError,
    logger::StageProgress,
};
use anyhow::{Context as _, Result};
use minijinja::{Value, context};
use serde::Serialize;

const HTML_SUFFIX: &str = ".html";

/// Shared read context handed to every template.
#[derive(Debug, Serialize)]
pub struct BuildContext<'a> {
    pub data: &'a Datasets,
    pub docs: &'a [Document],
}

/// Everything the render stage needs besides the documents.
pub struct PageRenderer<'a> {
    pub templates: &'a Templates,
    pub markdown: MarkdownRenderer,
    /// Layout wrapped around markdown documents
    pub page_layout: &'a str,
}

/// Render all documents in place.
///
/// Passthrough documents are left exactly as loaded.
pub fn render(docs: &mut [Document], data: &Datasets, renderer: &PageRenderer<'_>) -> Result<()> {
    // serialized once, so later renders cannot change what templates see
    let snapshot = Value::from_serialize(BuildContext { data, docs: &*docs });

    let progress = StageProgress::start("render", docs.len());
    for doc in docs.iter_mut() {
        render_doc(doc, &snapshot, renderer)?;
        if let Some(progress) = &progress {
            progress.inc();
        }
    }

    Ok(())
}

fn render_doc(doc: &mut Document, snapshot: &Value, renderer: &PageRenderer<'_>) -> Result<()> {
    let Some(suffix) = doc.kind.source_suffix() else {
        return Ok(());
    };
    let source_name = doc.path().to_string_lossy().into_owned();
    let Some(source) = doc.content.as_text().map(str::to_owned) else {
        return Err(BuildError::Encoding(doc.path()).into());
    };

    doc.file_name = swap_suffix(&doc.file_name, suffix);
    let rendered = if doc.kind == DocKind::Markdown {
        doc.content = Content::Text(renderer.markdown.to_html(&source));
        renderer
            .templates
            .render_layout(renderer.page_layout, doc_context(snapshot, doc))
            .with_context(|| format!("Failed to render `{source_name}`"))?
    } else {
        // the raw body is the template; `doc.content` still holds it
        renderer
            .templates
            .render_source(&source_name, &source, doc_context(snapshot, doc))?
    };

    doc.content = Content::Text(rendered);
    Ok(())
}

/// The shared context plus the `doc` variable.
fn doc_context(snapshot: &Value, doc: &Document) -> Value {
    context! {
        context => snapshot,
        doc => doc,
    }
}

/// `post.md` → `post.html`. Only the trailing suffix is replaced.
fn swap_suffix(file_name: &str, suffix: &str) -> String {
    let stem = file_name.strip_suffix(suffix).unwrap_or(file_name);
    format!("{stem}{HTML_SUFFIX}")
}
