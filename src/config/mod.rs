//! Site configuration management for `site.toml`.
//!
//! The file is optional: a site laid out with the default directory names
//! builds without one.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"
//! output = "build"
//! layouts = "layouts"
//! static = "static"
//! data = "data"
//! page_layout = "page.jinja2"
//!
//! [build.markdown]
//! tables = true
//!
//! [build.history]
//! enable = true
//! command = ["git"]
//! ```

mod build;
pub mod defaults;
mod error;
mod paths;

pub use build::{BuildConfig, HistoryConfig, MarkdownConfig};
pub use paths::PathResolver;

use crate::cli::Cli;
use anyhow::{Context, Result, bail};
use error::ConfigError;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing site.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading, may not exist)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config named by the CLI (if present), apply CLI overrides,
    /// and resolve every path against the site root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)
                .with_context(|| format!("Failed to load `{}`", config_path.display()))?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Path resolver from the content tree to the output tree.
    pub fn paths(&self) -> PathResolver<'_> {
        PathResolver::new(&self.build.content, &self.build.output)
    }

    /// Where the static tree lands inside the output directory.
    ///
    /// Mirrors the static directory's location relative to the site root,
    /// e.g. `static/` → `build/static/`.
    pub fn static_output_dir(&self) -> PathBuf {
        let static_dir = &self.build.static_dir;
        let relative = static_dir
            .strip_prefix(self.get_root())
            .ok()
            .map(Path::to_path_buf)
            .or_else(|| static_dir.file_name().map(PathBuf::from))
            .unwrap_or_default();
        self.build.output.join(relative)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.build.layouts, cli.layouts.as_ref());
        Self::update_option(&mut self.build.static_dir, cli.static_dir.as_ref());
        Self::update_option(&mut self.build.data, cli.data.as_ref());
        Self::update_option(&mut self.build.history.enable, cli.history.as_ref());

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all directories against root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        let build = &mut self.build;
        for dir in [
            &mut build.content,
            &mut build.output,
            &mut build.layouts,
            &mut build.static_dir,
            &mut build.data,
        ] {
            *dir = Self::normalize_path(&root.join(&*dir));
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before a build
    pub fn validate(&self) -> Result<()> {
        if self.build.page_layout.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[build.page_layout] must not be empty".into()
            ));
        }

        // the output tree is deleted on every build
        let output = &self.build.output;
        let inputs = [
            ("site root", self.get_root()),
            ("[build.content]", self.build.content.as_path()),
            ("[build.layouts]", self.build.layouts.as_path()),
            ("[build.static]", self.build.static_dir.as_path()),
            ("[build.data]", self.build.data.as_path()),
        ];
        for (name, input) in inputs {
            if input.starts_with(output) {
                bail!(ConfigError::Validation(format!(
                    "[build.output] `{}` must not contain the {name} `{}`",
                    output.display(),
                    input.display()
                )));
            }
        }

        if self.build.history.enable {
            Self::check_command_installed("[build.history.command]", &self.build.history.command)?;
        }

        Ok(())
    }

    /// Check if a command is installed and available
    fn check_command_installed(field: &str, command: &[String]) -> Result<()> {
        let Some(cmd) = command.first() else {
            bail!(ConfigError::Validation(format!(
                "{field} must have at least one element"
            )));
        };

        which::which(cmd).map_err(|_| ConfigError::CommandNotFound(cmd.clone()))?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
