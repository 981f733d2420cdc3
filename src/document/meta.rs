//! Typed document metadata.
//!
//! Front matter is free-form YAML, but once loaded every value is one of a
//! closed set of variants. Templates see the values as plain data:
//! timestamps serialize as RFC 3339 strings.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_yaml_ng::Value as Yaml;
use std::collections::BTreeMap;

/// Metadata bag of a document, keyed by field name.
pub type Metadata = BTreeMap<String, MetaValue>;

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Timestamp(DateTime<FixedOffset>),
    List(Vec<MetaValue>),
    Map(BTreeMap<String, MetaValue>),
}

impl From<Yaml> for MetaValue {
    fn from(value: Yaml) -> Self {
        match value {
            Yaml::Null => Self::Null,
            Yaml::Bool(b) => Self::Bool(b),
            Yaml::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            Yaml::String(s) => Self::String(s),
            Yaml::Sequence(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Yaml::Mapping(map) => Self::Map(
                map.into_iter()
                    .filter_map(|(k, v)| yaml_key(k).map(|k| (k, Self::from(v))))
                    .collect(),
            ),
            Yaml::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// Convert a YAML mapping key into a metadata key.
///
/// Scalar keys are stringified (`1: x` becomes `"1"`); compound keys have
/// no sensible name and are dropped.
pub(super) fn yaml_key(key: Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> MetaValue {
        MetaValue::from(serde_yaml_ng::from_str::<Yaml>(text).unwrap())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(yaml("true"), MetaValue::Bool(true));
        assert_eq!(yaml("42"), MetaValue::Integer(42));
        assert_eq!(yaml("1.5"), MetaValue::Float(1.5));
        assert_eq!(yaml("hello"), MetaValue::String("hello".into()));
        assert_eq!(yaml("~"), MetaValue::Null);
    }

    #[test]
    fn test_list_and_map() {
        assert_eq!(
            yaml("[rust, ssg]"),
            MetaValue::List(vec![
                MetaValue::String("rust".into()),
                MetaValue::String("ssg".into()),
            ])
        );

        let MetaValue::Map(map) = yaml("{author: ann, 2: two}") else {
            panic!("expected a map");
        };
        assert_eq!(map.get("author"), Some(&MetaValue::String("ann".into())));
        assert_eq!(map.get("2"), Some(&MetaValue::String("two".into())));
    }

    #[test]
    fn test_serialize_plain_values() {
        let ts = DateTime::parse_from_rfc3339("2020-03-17T22:30:27-05:00").unwrap();
        let mut meta = Metadata::new();
        meta.insert("draft".into(), MetaValue::Bool(false));
        meta.insert("when".into(), MetaValue::Timestamp(ts));
        meta.insert("title".into(), MetaValue::String("Hi".into()));

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["draft"], serde_json::json!(false));
        assert_eq!(json["title"], serde_json::json!("Hi"));
        assert_eq!(json["when"], serde_json::json!("2020-03-17T22:30:27-05:00"));
    }
}
