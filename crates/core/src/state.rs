//! Persisted sync watermark: a single RFC 3339 timestamp in a plain text
//! file, read at start of a run and overwritten only when a run completes.

use std::path::Path;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::{HomeroomError, Result};

/// Read the last-run watermark. A missing file means no previous run.
pub fn load(path: &Path) -> Result<Option<DateTime<Utc>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let trimmed = content.trim();
    let parsed = DateTime::parse_from_rfc3339(trimmed).map_err(|e| {
        HomeroomError::State(format!(
            "invalid watermark in {}: {e}",
            path.display()
        ))
    })?;
    Ok(Some(parsed.with_timezone(&Utc)))
}

/// Overwrite the watermark with the given timestamp.
pub fn save(path: &Path, timestamp: DateTime<Utc>) -> Result<()> {
    std::fs::write(path, format!("{}\n", timestamp.to_rfc3339()))?;
    Ok(())
}

/// Compute the `updated_after` bound for an incremental pull: the watermark
/// date minus the configured overlap.
pub fn lookback(watermark: DateTime<Utc>, overlap_days: i64) -> NaiveDate {
    let days = Days::new(overlap_days.max(0) as u64);
    watermark
        .date_naive()
        .checked_sub_days(days)
        .unwrap_or(watermark.date_naive())
}
