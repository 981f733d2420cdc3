//! Jinja environment over the layouts directory.
//!
//! Layouts are looked up by their path below `layouts/`, so a document
//! template can `{% extends "page.jinja2" %}` or
//! `{% include "partials/nav.jinja2" %}`. Output is never auto-escaped, and
//! undefined variables render as empty the way Jinja2 does.

use crate::error::BuildError;
use anyhow::{Context as _, Result};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior, path_loader};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub struct Templates {
    env: Environment<'static>,
    dir: PathBuf,
}

impl Templates {
    /// Serve layouts from `dir`. Layouts are read on first use, so a missing
    /// directory is only an error once a layout is requested.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir));
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Lenient);

        Ok(Self {
            env,
            dir: dir.to_path_buf(),
        })
    }

    /// Render a layout by name.
    pub fn render_layout<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        let template = match self.env.get_template(name) {
            Ok(template) => template,
            Err(err) if err.kind() == ErrorKind::TemplateNotFound => {
                return Err(BuildError::MissingLayout {
                    name: name.to_owned(),
                    dir: self.dir.clone(),
                }
                .into());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to load layout `{name}`"));
            }
        };
        template
            .render(context)
            .with_context(|| format!("Failed to render layout `{name}`"))
    }

    /// Compile `source` as a one-off template next to the layouts and render it.
    ///
    /// `name` only shows up in error messages; the template is never
    /// registered, so later lookups cannot see it.
    pub fn render_source<S: Serialize>(&self, name: &str, source: &str, context: S) -> Result<String> {
        self.env
            .render_named_str(name, source, context)
            .with_context(|| format!("Failed to render template `{name}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;
    use std::fs;
    use tempfile::TempDir;

    fn layouts(files: &[(&str, &str)]) -> (TempDir, Templates) {
        let dir = TempDir::new().unwrap();
        for (name, body) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let templates = Templates::load(dir.path()).unwrap();
        (dir, templates)
    }

    #[test]
    fn test_render_layout() {
        let (_dir, templates) = layouts(&[("page.jinja2", "<main>{{ body }}</main>")]);
        assert_eq!(
            templates
                .render_layout("page.jinja2", context! { body => "<p>x</p>" })
                .unwrap(),
            "<main><p>x</p></main>"
        );
    }

    #[test]
    fn test_missing_layout() {
        let (_dir, templates) = layouts(&[]);
        let err = templates.render_layout("page.jinja2", context! {}).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingLayout { .. })
        ));
    }

    #[test]
    fn test_missing_layouts_dir() {
        let dir = TempDir::new().unwrap();
        let templates = Templates::load(&dir.path().join("layouts")).unwrap();
        assert!(templates.render_layout("page.jinja2", context! {}).is_err());
    }

    #[test]
    fn test_render_source_extends_nested_layout() {
        let (_dir, templates) = layouts(&[(
            "base/site.jinja2",
            "<html>{% block main %}{% endblock %}</html>",
        )]);
        let source = r#"{% extends "base/site.jinja2" %}{% block main %}{{ n }}{% endblock %}"#;
        assert_eq!(
            templates
                .render_source("post.jinja2", source, context! { n => 3 })
                .unwrap(),
            "<html>3</html>"
        );
    }

    #[test]
    fn test_render_source_does_not_leak() {
        let (_dir, templates) = layouts(&[]);
        templates
            .render_source("one.jinja2", "one", context! {})
            .unwrap();
        assert!(templates.render_layout("one.jinja2", context! {}).is_err());
    }

    #[test]
    fn test_no_autoescape() {
        let (_dir, templates) = layouts(&[]);
        assert_eq!(
            templates
                .render_source("x.html", "{{ html }}", context! { html => "<b>&</b>" })
                .unwrap(),
            "<b>&</b>"
        );
    }

    #[test]
    fn test_undefined_renders_empty() {
        let (_dir, templates) = layouts(&[(
            "page.jinja2",
            "[{{ missing }}][{{ doc.metadata.last_modified }}]{% if doc.metadata.title %}t{% endif %}",
        )]);
        let doc = context! { metadata => context! {} };
        assert_eq!(
            templates
                .render_layout("page.jinja2", context! { doc => doc })
                .unwrap(),
            "[][]"
        );
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let (_dir, templates) = layouts(&[("broken.jinja2", "{% if %}")]);
        assert!(
            templates
                .render_source("bad.jinja2", "{% if %}", context! {})
                .is_err()
        );
        let err = templates.render_layout("broken.jinja2", context! {}).unwrap_err();
        assert!(err.downcast_ref::<BuildError>().is_none());
    }
}
