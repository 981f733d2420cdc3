//! Timestamps read from version history.

use crate::error::BuildError;
use chrono::{DateTime, FixedOffset};

/// Layout of `git log --date=default`, e.g. `Tue Mar 17 22:30:27 2020 -0500`.
const HISTORY_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Layout shown to readers, e.g. `March 17, 2020 at 10:30 PM`.
const HUMAN_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// Parse a history timestamp, keeping its UTC offset.
pub fn parse_history_timestamp(text: &str) -> Result<DateTime<FixedOffset>, BuildError> {
    let text = text.trim();
    DateTime::parse_from_str(text, HISTORY_FORMAT).map_err(|source| BuildError::Timestamp {
        text: text.to_owned(),
        source,
    })
}

/// Format in the timestamp's own offset.
pub fn human_readable(datetime: &DateTime<FixedOffset>) -> String {
    datetime.format(HUMAN_FORMAT).to_string()
}
