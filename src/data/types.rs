use indexmap::IndexMap;
use std::collections::BTreeMap;

/// One CSV record: header field → cell text, in header order.
pub type Row = IndexMap<String, String>;

/// Dataset name → rows in file order.
pub type Datasets = BTreeMap<String, Vec<Row>>;
