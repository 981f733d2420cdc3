//! Last-modified metadata from version history.
//!
//! For every document with history, two keys are added:
//!
//! - `last_modified_date`: the commit timestamp with its offset
//! - `last_modified`: the same instant as `March 17, 2020 at 10:30 PM`
//!
//! Documents without history are left alone.

use crate::{
    document::{Document, MetaValue},
    log,
    logger::StageProgress,
    utils::{
        date::{human_readable, parse_history_timestamp},
        git::History,
    },
};
use anyhow::Result;
use std::path::Path;

pub const LAST_MODIFIED_DATE: &str = "last_modified_date";
pub const LAST_MODIFIED: &str = "last_modified";

/// Annotate documents with their last commit time.
///
/// Paths are handed to `history` relative to `root`, the directory history
/// commands run from.
pub fn annotate(docs: &mut [Document], history: &dyn History, root: &Path) -> Result<()> {
    let progress = StageProgress::start("history", docs.len());
    let mut tracked = 0;

    for doc in docs.iter_mut() {
        let path = doc.path();
        let relative = path.strip_prefix(root).unwrap_or(&path);

        if let Some(text) = history.last_modified(relative)? {
            let datetime = parse_history_timestamp(&text)?;
            doc.metadata
                .insert(LAST_MODIFIED.into(), MetaValue::String(human_readable(&datetime)));
            doc.metadata
                .insert(LAST_MODIFIED_DATE.into(), MetaValue::Timestamp(datetime));
            tracked += 1;
        }

        if let Some(progress) = &progress {
            progress.inc();
        }
    }

    if tracked < docs.len() {
        log!("history"; "{} of {} documents have no history", docs.len() - tracked, docs.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Content, Metadata};
    use crate::error::BuildError;
    use std::{collections::HashMap, path::PathBuf};

    struct MockHistory(HashMap<PathBuf, String>);

    impl MockHistory {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(path, text)| (PathBuf::from(path), text.to_string()))
                    .collect(),
            )
        }
    }

    impl History for MockHistory {
        fn last_modified(&self, path: &Path) -> Result<Option<String>> {
            Ok(self.0.get(path).cloned())
        }
    }

    fn doc(name: &str) -> Document {
        Document::new(
            PathBuf::from("/site/content"),
            name.into(),
            Metadata::new(),
            Content::Text(String::new()),
        )
    }

    #[test]
    fn test_annotate_tracked_document() {
        let history = MockHistory::new(&[("content/a.md", "Tue Mar 17 22:30:27 2020 -0500")]);
        let mut docs = vec![doc("a.md")];

        annotate(&mut docs, &history, Path::new("/site")).unwrap();

        let meta = &docs[0].metadata;
        assert_eq!(
            meta.get(LAST_MODIFIED),
            Some(&MetaValue::String("March 17, 2020 at 10:30 PM".into()))
        );
        let Some(MetaValue::Timestamp(dt)) = meta.get(LAST_MODIFIED_DATE) else {
            panic!("missing timestamp");
        };
        assert_eq!(dt.to_rfc3339(), "2020-03-17T22:30:27-05:00");
    }

    #[test]
    fn test_annotate_untracked_document() {
        let history = MockHistory::new(&[]);
        let mut docs = vec![doc("new.md")];

        annotate(&mut docs, &history, Path::new("/site")).unwrap();

        assert!(!docs[0].metadata.contains_key(LAST_MODIFIED));
        assert!(!docs[0].metadata.contains_key(LAST_MODIFIED_DATE));
    }

    #[test]
    fn test_annotate_overrides_front_matter() {
        let history = MockHistory::new(&[("content/a.md", "Tue Mar 17 22:30:27 2020 -0500")]);
        let mut d = doc("a.md");
        d.metadata
            .insert(LAST_MODIFIED.into(), MetaValue::String("never".into()));
        let mut docs = vec![d];

        annotate(&mut docs, &history, Path::new("/site")).unwrap();
        assert_eq!(
            docs[0].metadata.get(LAST_MODIFIED),
            Some(&MetaValue::String("March 17, 2020 at 10:30 PM".into()))
        );
    }

    #[test]
    fn test_annotate_malformed_timestamp_is_fatal() {
        let history = MockHistory::new(&[("content/a.md", "last tuesday")]);
        let mut docs = vec![doc("a.md")];

        let err = annotate(&mut docs, &history, Path::new("/site")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::Timestamp { .. })
        ));
    }
}
