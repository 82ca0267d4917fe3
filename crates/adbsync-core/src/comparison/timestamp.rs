//! Timestamp equivalence between remote listings and local files
//!
//! Remote listings only carry minutes and no time zone. Listing times are
//! read as UTC, and pulled files are stamped with that same UTC instant, so a
//! freshly mirrored file compares equal on the next run.

use std::time::{Duration, SystemTime};

use chrono::{DateTime, Datelike, NaiveDateTime, TimeDelta, Utc};
use filetime::FileTime;

/// Earliest year representable on FAT-style filesystems
pub const ORIGIN_YEAR: i32 = 1980;

/// Timestamp comparator
pub struct TimestampComparator;

impl TimestampComparator {
    /// Check whether two timestamps are within `tolerance` of each other
    ///
    /// When exactly one side lies in [`ORIGIN_YEAR`] and the other before it,
    /// both are moved to [`ORIGIN_YEAR`] and compared again. This covers
    /// filesystems that clamp dates to their epoch while the other side
    /// does not.
    #[must_use]
    pub fn equivalent(a: NaiveDateTime, b: NaiveDateTime, tolerance: Duration) -> bool {
        let tolerance = TimeDelta::from_std(tolerance).unwrap_or(TimeDelta::MAX);

        if Self::within(a, b, tolerance) {
            return true;
        }

        let clamped = (a.year() == ORIGIN_YEAR && b.year() < ORIGIN_YEAR)
            || (a.year() < ORIGIN_YEAR && b.year() == ORIGIN_YEAR);
        if !clamped {
            return false;
        }

        match (a.with_year(ORIGIN_YEAR), b.with_year(ORIGIN_YEAR)) {
            (Some(a), Some(b)) => Self::within(a, b, tolerance),
            _ => false,
        }
    }

    fn within(a: NaiveDateTime, b: NaiveDateTime, tolerance: TimeDelta) -> bool {
        let delta = if a >= b { a - b } else { b - a };
        delta <= tolerance
    }

    /// Convert a local modification time to the listing's naive UTC time
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> NaiveDateTime {
        DateTime::<Utc>::from(time).naive_utc()
    }

    /// Convert a listing time to a file time for stamping local files
    #[must_use]
    pub fn to_file_time(timestamp: NaiveDateTime) -> FileTime {
        let utc = timestamp.and_utc();
        FileTime::from_unix_time(utc.timestamp(), utc.timestamp_subsec_nanos())
    }
}
