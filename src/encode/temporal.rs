//! Deterministic timezone normalization for zone-naive temporal columns.
//!
//! The wire format's temporal type has no notion of "ambiguous local time", so
//! the ambiguity must be resolved before encoding, and the resolution must
//! match the convention used by the client surface's own date parser:
//!
//! - a column whose every value is exactly midnight is a date-only column and
//!   is assigned UTC (a bare date is UTC midnight);
//! - any other column was expressed in the process's local zone and is
//!   localized to the process's *standard* (non-DST-adjusted) offset, then
//!   stored as UTC instants.

use chrono::{Datelike, Local, NaiveDateTime, NaiveTime, Offset, TimeZone};

/// A fixed UTC offset captured once per encode call.
///
/// Holds both the offset in seconds and its rendered `±HH:MM` form, which is
/// what the wire schema records as the column zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalOffset {
    seconds: i32,
    label: String,
}

impl LocalOffset {
    /// Builds an offset from a signed second count east of UTC.
    pub fn from_seconds(seconds: i32) -> Self {
        let sign = if seconds < 0 { '-' } else { '+' };
        let abs = seconds.unsigned_abs();
        let label = format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60);
        Self { seconds, label }
    }

    /// Captures the process's standard offset.
    ///
    /// The standard offset is the smaller of the January and July offsets for
    /// the current year: DST shifts the clock forward, never back, in both
    /// hemispheres, so the minimum of the two is the non-DST value.
    pub fn standard() -> Self {
        let year = Local::now().year();
        let jan = offset_seconds_at(year, 1);
        let jul = offset_seconds_at(year, 7);
        Self::from_seconds(jan.min(jul))
    }

    pub fn seconds(&self) -> i32 {
        self.seconds
    }

    /// The rendered `±HH:MM` form.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The local UTC offset in effect at noon on the first of the given month.
fn offset_seconds_at(year: i32, month: u32) -> i32 {
    Local
        .with_ymd_and_hms(year, month, 1, 12, 0, 0)
        .earliest()
        .map(|dt| dt.offset().fix().local_minus_utc())
        .unwrap_or(0)
}

/// Whether every non-null value's time-of-day is exactly midnight.
///
/// Nulls are skipped; an empty or all-null column is vacuously midnight,
/// matching the date-only convention.
pub fn all_midnight(values: &[Option<NaiveDateTime>]) -> bool {
    values
        .iter()
        .flatten()
        .all(|dt| dt.time() == NaiveTime::MIN)
}

/// Reads a naive datetime as a UTC instant, in epoch milliseconds.
pub fn utc_millis(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}

/// Converts a naive datetime expressed at the given offset into a UTC instant,
/// in epoch milliseconds.
pub fn utc_millis_at_offset(value: NaiveDateTime, offset: &LocalOffset) -> i64 {
    value.and_utc().timestamp_millis() - i64::from(offset.seconds()) * 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn offset_labels() {
        assert_eq!(LocalOffset::from_seconds(0).label(), "+00:00");
        assert_eq!(LocalOffset::from_seconds(-5 * 3600).label(), "-05:00");
        assert_eq!(LocalOffset::from_seconds(5 * 3600 + 30 * 60).label(), "+05:30");
        assert_eq!(LocalOffset::from_seconds(-(9 * 3600 + 30 * 60)).label(), "-09:30");
    }

    #[test]
    fn midnight_detection() {
        let midnights = vec![Some(dt(2022, 1, 1, 0, 0, 0)), None, Some(dt(2022, 3, 5, 0, 0, 0))];
        assert!(all_midnight(&midnights));

        let mixed = vec![Some(dt(2022, 1, 1, 0, 0, 0)), Some(dt(2022, 1, 1, 9, 30, 0))];
        assert!(!all_midnight(&mixed));
    }

    #[test]
    fn all_null_column_counts_as_midnight() {
        assert!(all_midnight(&[None, None]));
        assert!(all_midnight(&[]));
    }

    #[test]
    fn sub_second_times_are_not_midnight() {
        let value = NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_milli_opt(0, 0, 0, 1)
            .unwrap();
        assert!(!all_midnight(&[Some(value)]));
    }

    #[test]
    fn localization_shifts_by_the_offset() {
        let value = dt(2022, 6, 15, 12, 0, 0);
        let as_utc = utc_millis(value);

        // A wall-clock reading taken five hours west of UTC is five hours
        // later as an instant.
        let offset = LocalOffset::from_seconds(-5 * 3600);
        assert_eq!(utc_millis_at_offset(value, &offset), as_utc + 5 * 3600 * 1000);

        let offset = LocalOffset::from_seconds(5 * 3600 + 30 * 60);
        assert_eq!(
            utc_millis_at_offset(value, &offset),
            as_utc - (5 * 3600 + 30 * 60) * 1000
        );
    }

    #[test]
    fn standard_offset_is_renderable() {
        // Whatever zone the test host runs in, the captured offset must render
        // as a fixed ±HH:MM string.
        let offset = LocalOffset::standard();
        let label = offset.label();
        assert_eq!(label.len(), 6);
        assert!(label.starts_with('+') || label.starts_with('-'));
        assert_eq!(&label[3..4], ":");
    }
}
