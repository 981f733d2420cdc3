//! `[build]` section configuration.
//!
//! Source directories, output directory, and the knobs of the render and
//! history stages.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in site.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source documents
/// output = "build"         # Recreated on every run
/// static = "static"        # Copied verbatim into the output
///
/// [build.history]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Site root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Template directory, searched by `{% extends %}` and `{% include %}`.
    #[serde(default = "defaults::build::layouts")]
    #[educe(Default = defaults::build::layouts())]
    pub layouts: PathBuf,

    /// Static assets directory, copied as-is.
    #[serde(rename = "static", default = "defaults::build::r#static")]
    #[educe(Default = defaults::build::r#static())]
    pub static_dir: PathBuf,

    /// Directory of `name.csv` datasets.
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// Layout wrapped around every markdown document (name inside `layouts`).
    #[serde(default = "defaults::build::page_layout")]
    #[educe(Default = defaults::build::page_layout())]
    pub page_layout: String,

    /// Markdown dialect options.
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Last-modified annotation from version history.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// `[build.markdown]` section - optional CommonMark extensions.
///
/// Everything is off by default, which keeps output plain CommonMark.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
    pub footnotes: bool,
}

/// `[build.history]` section - version history lookup.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Inject `last_modified` / `last_modified_date` into document metadata.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Git executable (and leading arguments).
    #[serde(default = "defaults::build::history::command")]
    #[educe(Default = defaults::build::history::command())]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let build = BuildConfig::default();
        assert_eq!(build.content, PathBuf::from("content"));
        assert_eq!(build.output, PathBuf::from("build"));
        assert_eq!(build.layouts, PathBuf::from("layouts"));
        assert_eq!(build.static_dir, PathBuf::from("static"));
        assert_eq!(build.data, PathBuf::from("data"));
        assert_eq!(build.page_layout, "page.jinja2");
        assert!(build.history.enable);
        assert_eq!(build.history.command, vec!["git".to_string()]);
        assert!(!build.markdown.tables);
    }

    #[test]
    fn test_static_is_renamed() {
        let build: BuildConfig = toml::from_str(r#"static = "public-assets""#).unwrap();
        assert_eq!(build.static_dir, PathBuf::from("public-assets"));
    }

    #[test]
    fn test_partial_history_section() {
        let build: BuildConfig = toml::from_str(
            r#"
            [history]
            enable = false
        "#,
        )
        .unwrap();
        assert!(!build.history.enable);
        assert_eq!(build.history.command, vec!["git".to_string()]);
    }

    #[test]
    fn test_markdown_flags() {
        let build: BuildConfig = toml::from_str(
            r#"
            [markdown]
            tables = true
            footnotes = true
        "#,
        )
        .unwrap();
        assert!(build.markdown.tables);
        assert!(build.markdown.footnotes);
        assert!(!build.markdown.strikethrough);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<BuildConfig, _> = toml::from_str(r#"minify = true"#);
        assert!(result.is_err());
    }
}
