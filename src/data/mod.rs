//! Site-wide tabular data for templates.
//!
//! Every CSV file in the data directory becomes one dataset, available to
//! templates as `context.data.<name>`:
//!
//! ```text
//! data/
//! ├── widgets.csv      → context.data.widgets
//! ├── team.2024.csv    → context.data.team
//! ├── _draft.csv       (skipped: leading underscore)
//! └── notes.txt        (ignored: not csv)
//! ```
//!
//! Rows are field → string maps keyed by the header row, iterating in
//! header order.
//!
//! ```jinja
//! {% for w in context.data.widgets %}
//!   <li>{{ w.id }}: {{ w.name }}</li>
//! {% endfor %}
//! ```

mod types;

pub use types::{Datasets, Row};

use crate::{error::BuildError, log};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// File names starting with this are never loaded.
const SKIP_PREFIX: char = '_';
const CSV_EXTENSION: &str = "csv";

/// Load every dataset in `dir`.
///
/// # Errors
///
/// A missing directory, a qualifying file name without an extension, and
/// unreadable or malformed CSV are all fatal.
pub fn load_data(dir: &Path) -> Result<Datasets> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory `{}`", dir.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read `{}`", dir.display()))?;
    // later files win on a name clash; keep that deterministic
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut datasets = Datasets::new();
    for entry in entries {
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if file_name.starts_with(SKIP_PREFIX) {
            continue;
        }

        let (name, extension) = split_dataset_name(&file_name)?;
        if extension != CSV_EXTENSION {
            continue;
        }

        let rows = read_csv(&entry.path())?;
        log!("data"; "{name}: {} rows", rows.len());
        datasets.insert(name.to_owned(), rows);
    }

    Ok(datasets)
}

/// `team.2024.csv` → (`team`, `csv`).
fn split_dataset_name(file_name: &str) -> Result<(&str, &str), BuildError> {
    let (name, _) = file_name
        .split_once('.')
        .ok_or_else(|| BuildError::DatasetName(file_name.to_owned()))?;
    let extension = file_name.rsplit_once('.').map_or("", |(_, ext)| ext);
    Ok((name, extension))
}

/// Header row first. Short rows are padded with empty strings, long rows
/// are cut to the header width.
fn read_csv(path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open `{}`", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of `{}`", path.display()))?
        .clone();

    reader
        .records()
        .map(|record| -> Result<Row> {
            let record =
                record.with_context(|| format!("Malformed row in `{}`", path.display()))?;
            Ok(headers
                .iter()
                .enumerate()
                .map(|(i, field)| (field.to_owned(), record.get(i).unwrap_or_default().to_owned()))
                .collect())
        })
        .collect()
}
