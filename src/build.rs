//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_docs()     content/**      → Document[]
//!     ├── load_data()     data/*.csv      → Datasets
//!     ├── annotate()      git log         → last_modified metadata
//!     ├── render()        markdown/jinja2 → HTML (against a pre-render snapshot)
//!     ├── prepare()       content paths   → pretty output paths
//!     └── persist()       rm -rf build/, copy static/, write documents
//! ```
//!
//! Every stage runs to completion before the next starts, and the first
//! error aborts the build.

use crate::{
    compiler::{MarkdownRenderer, PageRenderer, Templates, annotate, persist, prepare, render},
    config::SiteConfig,
    data::load_data,
    document::{DocKind, Document, load_docs},
    log,
    utils::git::{GitHistory, History, NoHistory},
};
use anyhow::{Context, Result};

/// Build the site described by `config`, taking history from git when
/// `[build.history]` is enabled.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let history = &config.build.history;
    if history.enable {
        let git = GitHistory::new(config.get_root(), &history.command);
        build_with_history(config, &git)
    } else {
        build_with_history(config, &NoHistory)
    }
}

/// Run the full pipeline with an explicit history source.
pub fn build_with_history(config: &SiteConfig, history: &dyn History) -> Result<()> {
    let build = &config.build;

    let mut docs = load_docs(&build.content)?;
    log_documents(&docs);

    let data = load_data(&build.data)?;
    log!("data"; "loaded {} datasets", data.len());

    annotate(&mut docs, history, config.get_root()).context("Failed to read history")?;

    let templates = Templates::load(&build.layouts)?;
    let renderer = PageRenderer {
        templates: &templates,
        markdown: MarkdownRenderer::new(&build.markdown),
        page_layout: &build.page_layout,
    };
    render(&mut docs, &data, &renderer)?;

    prepare(&mut docs, config.paths())?;

    let written = persist(&docs, config)?;
    log_build_result(written);

    Ok(())
}

/// Log document counts per kind.
fn log_documents(docs: &[Document]) {
    let count = |kind: DocKind| docs.iter().filter(|doc| doc.kind == kind).count();
    log!(
        "content";
        "{} documents ({} markdown, {} templates, {} files)",
        docs.len(),
        count(DocKind::Markdown),
        count(DocKind::Template),
        count(DocKind::Passthrough)
    );
}

fn log_build_result(written: usize) {
    if written == 0 {
        log!("warn"; "output is empty, check the content and static directories");
    } else {
        log!("build"; "done, {written} files written");
    }
}
