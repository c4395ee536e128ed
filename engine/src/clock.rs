//! Identity and time stamping.
//!
//! Ids are handed out by a store-owned [`IdGenerator`] instead of being read
//! straight off the wall clock, so two records created within the same
//! millisecond still get distinct ids.

use crate::{error::Result, Error, RecordId, Timestamp};
use chrono::{DateTime, SecondsFormat, Utc};

/// Monotonic id source.
///
/// Ids are seeded from the current time in milliseconds, which keeps them in
/// the same range as ids already present in existing data files. Ordering rules:
/// 1. Never below the current time
/// 2. Always above the last id handed out
/// 3. Always above the highest id already present in the target collection
///
/// When no id satisfies rules 2 and 3 the generator reports
/// [`Error::IdExhausted`] instead of repeating one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdGenerator {
    last: RecordId,
}

impl IdGenerator {
    /// Create a generator that has not issued any id yet.
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Create a generator that resumes after `last`.
    pub fn with_last(last: RecordId) -> Self {
        Self { last }
    }

    /// Last id handed out.
    pub fn last(&self) -> RecordId {
        self.last
    }

    /// Issue the next id.
    ///
    /// `floor` is the highest id currently stored in the collection the id is
    /// meant for, if any.
    pub fn next(&mut self, now: Timestamp, floor: Option<RecordId>) -> Result<RecordId> {
        let after_last = self.last.checked_add(1).ok_or(Error::IdExhausted)?;
        let mut id = now.max(after_last);
        if let Some(floor) = floor {
            id = id.max(floor.checked_add(1).ok_or(Error::IdExhausted)?);
        }
        self.last = id;
        Ok(id)
    }
}

/// Milliseconds since the Unix epoch, clamped at zero.
pub fn millis(now: DateTime<Utc>) -> Timestamp {
    u64::try_from(now.timestamp_millis()).unwrap_or(0)
}

/// ISO-8601 UTC with millisecond precision, e.g. `2026-10-18T09:30:00.123Z`.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The `YYYY-MM-DD` prefix of [`iso_timestamp`] for the same instant.
pub fn iso_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}
