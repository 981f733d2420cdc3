//! Markdown → HTML conversion with pulldown-cmark.
//!
//! Plain CommonMark unless `[build.markdown]` turns extensions on. Raw HTML
//! blocks pass through unchanged.

use crate::config::MarkdownConfig;
use pulldown_cmark::{Options, Parser, html::push_html};

#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new(config: &MarkdownConfig) -> Self {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, config.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, config.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, config.tasklists);
        options.set(Options::ENABLE_FOOTNOTES, config.footnotes);
        Self { options }
    }

    pub fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html = String::with_capacity(markdown.len() * 2);
        push_html(&mut html, parser);
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> MarkdownRenderer {
        MarkdownRenderer::new(&MarkdownConfig::default())
    }

    #[test]
    fn test_heading() {
        assert_eq!(plain().to_html("# Hi"), "<h1>Hi</h1>\n");
    }

    #[test]
    fn test_paragraph_and_emphasis() {
        assert_eq!(
            plain().to_html("Some *text* here."),
            "<p>Some <em>text</em> here.</p>\n"
        );
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = plain().to_html("<div class=\"note\">kept</div>\n");
        assert!(html.contains("<div class=\"note\">kept</div>"));
    }

    #[test]
    fn test_strikethrough_is_opt_in() {
        assert!(!plain().to_html("~~gone~~").contains("<del>"));

        let config = MarkdownConfig {
            strikethrough: true,
            ..MarkdownConfig::default()
        };
        assert!(MarkdownRenderer::new(&config).to_html("~~gone~~").contains("<del>gone</del>"));
    }

    #[test]
    fn test_tables_are_opt_in() {
        let table = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        assert!(!plain().to_html(table).contains("<table>"));

        let config = MarkdownConfig {
            tables: true,
            ..MarkdownConfig::default()
        };
        assert!(MarkdownRenderer::new(&config).to_html(table).contains("<table>"));
    }
}
