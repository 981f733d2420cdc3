//! YAML front matter, delimited by `---` lines at the top of a file.
//!
//! ```text
//! ---
//! title: Hello
//! tags: [rust]
//! ---
//! # Body starts here
//! ```

use super::meta::{MetaValue, Metadata, yaml_key};
use crate::log;
use serde_yaml_ng::Value as Yaml;

const DELIMITER: &str = "---";

/// Split `text` into `(front_matter, body)`.
///
/// Returns `None` when the text does not open with a delimiter line or the
/// block is never closed; the caller then keeps the whole text as body.
/// Blank lines between the closing delimiter and the body are dropped.
pub fn split(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let (first, rest) = text.split_once('\n')?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let front = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Some((front, body));
        }
        offset += line.len();
    }
    None
}

/// Parse a front matter block into metadata.
///
/// Anything that is not a YAML mapping yields empty metadata; a broken
/// block is reported and otherwise ignored.
pub fn parse(front: &str, origin: &str) -> Metadata {
    let value = match serde_yaml_ng::from_str::<Yaml>(front) {
        Ok(value) => value,
        Err(e) => {
            log!("warn"; "{origin}: ignoring front matter: {e}");
            return Metadata::new();
        }
    };

    match value {
        Yaml::Mapping(map) => map
            .into_iter()
            .filter_map(|(k, v)| yaml_key(k).map(|k| (k, MetaValue::from(v))))
            .collect(),
        _ => Metadata::new(),
    }
}

/// Split and parse in one go: `(metadata, body)`.
pub fn extract<'a>(text: &'a str, origin: &str) -> (Metadata, &'a str) {
    match split(text) {
        Some((front, body)) => (parse(front, origin), body),
        None => (Metadata::new(), text),
    }
}
