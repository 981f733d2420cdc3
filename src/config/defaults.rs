//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "build".into()
    }

    pub fn layouts() -> PathBuf {
        "layouts".into()
    }

    pub fn r#static() -> PathBuf {
        "static".into()
    }

    pub fn data() -> PathBuf {
        "data".into()
    }

    pub fn page_layout() -> String {
        "page.jinja2".into()
    }

    pub mod history {
        pub fn command() -> Vec<String> {
            vec!["git".into()]
        }
    }
}
