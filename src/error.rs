//! Fatal build errors.
//!
//! Everything here aborts the build. Conditions the pipeline tolerates
//! (missing front matter, untracked files) never become errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("data file `{0}` has no extension")]
    DatasetName(String),

    #[error("cannot parse history timestamp `{text}`")]
    Timestamp {
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("history lookup failed for `{path}`: {message}")]
    History { path: PathBuf, message: String },

    #[error("`{0}` is not valid UTF-8")]
    Encoding(PathBuf),

    #[error("static directory `{0}` not found")]
    MissingStatic(PathBuf),

    #[error("layout `{name}` not found in `{dir}`")]
    MissingLayout { name: String, dir: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_display() {
        let err = BuildError::DatasetName("README".into());
        assert_eq!(format!("{err}"), "data file `README` has no extension");

        let err = BuildError::MissingLayout {
            name: "page.jinja2".into(),
            dir: PathBuf::from("layouts"),
        };
        assert!(format!("{err}").contains("page.jinja2"));
    }

    #[test]
    fn test_timestamp_error_keeps_source() {
        use std::error::Error;

        let source = chrono::DateTime::parse_from_str("nope", "%Y").unwrap_err();
        let err = BuildError::Timestamp {
            text: "nope".into(),
            source,
        };
        assert!(err.source().is_some());
    }
}
