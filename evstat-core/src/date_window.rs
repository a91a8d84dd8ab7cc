//! Day-granular date windows for classifying events.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{EvstatError, EvstatResult};
use crate::event::Event;
use crate::status::Status;

/// Datetime layouts the store hands back for date columns, besides plain
/// YYYY-MM-DD and RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Postgres-style timestamps with a short offset, e.g. "2024-01-10 12:00:00+00"
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%#z",
];

/// The `[start, end]` interval an event occupies.
///
/// `start` is midnight of the first day and `end` is 23:59:59.999 of the last
/// day, so a single-day event stays ongoing for its whole day. Both are naive
/// local wall-clock times; `now` must be expressed the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateWindow {
    /// Build a window from calendar dates. A missing `end` means a single-day event.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> EvstatResult<Self> {
        let end = end.unwrap_or(start);

        if end < start {
            return Err(EvstatError::InvertedWindow { start, end });
        }

        Ok(DateWindow {
            start: start.and_time(NaiveTime::MIN),
            end: end_of_day(end),
        })
    }

    /// Parse raw date strings. Blank `end` is treated as absent.
    pub fn parse(start: &str, end: Option<&str>) -> EvstatResult<Self> {
        let start_date =
            parse_date(start).ok_or_else(|| EvstatError::invalid_date("start date", start))?;

        let end_date = match end.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(parse_date(s).ok_or_else(|| EvstatError::invalid_date("end date", s))?),
            None => None,
        };

        Self::new(start_date, end_date)
    }

    pub fn for_event(event: &Event) -> EvstatResult<Self> {
        Self::parse(&event.start_date, event.end_date())
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn is_single_day(&self) -> bool {
        self.start_date() == self.end_date()
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }

    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.start <= now && now <= self.end
    }

    pub fn classify(&self, now: NaiveDateTime) -> Status {
        if now > self.end {
            Status::Past
        } else if now >= self.start {
            Status::Ongoing
        } else {
            Status::Upcoming
        }
    }
}

/// Last representable millisecond of `date`.
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.succ_opt()
        .map(|next| next.and_time(NaiveTime::MIN) - Duration::milliseconds(1))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Parse a date column, discarding any time-of-day component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    parse_instant(s).map(|dt| dt.date())
}

/// Parse a point in time as local wall-clock time.
///
/// Date-only input means midnight. Offset-carrying input keeps the wall
/// clock as written rather than converting it.
pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.naive_local())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn test_single_day_window_spans_whole_day() {
        let window = DateWindow::new(date(2024, 1, 10), None).unwrap();

        assert_eq!(window.start(), at(2024, 1, 10, 0, 0, 0));
        assert_eq!(
            window.end(),
            date(2024, 1, 10).and_hms_milli_opt(23, 59, 59, 999).unwrap()
        );
        assert!(window.is_single_day());
        assert_eq!(window.days(), 1);
    }

    #[test]
    fn test_multi_day_window() {
        let window = DateWindow::parse("2024-01-05", Some("2024-01-07")).unwrap();

        assert_eq!(window.start_date(), date(2024, 1, 5));
        assert_eq!(window.end_date(), date(2024, 1, 7));
        assert!(!window.is_single_day());
        assert_eq!(window.days(), 3);
        assert!(window.contains(at(2024, 1, 6, 12, 0, 0)));
        assert!(!window.contains(at(2024, 1, 8, 0, 0, 0)));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let err = DateWindow::parse("2024-01-10", Some("2024-01-09")).unwrap_err();

        match err {
            EvstatError::InvertedWindow { start, end } => {
                assert_eq!(start, date(2024, 1, 10));
                assert_eq!(end, date(2024, 1, 9));
            }
            other => panic!("Expected InvertedWindow, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_start_is_invalid_date() {
        for raw in ["", "   ", "tomorrow", "2024-13-01", "10/01/2024"] {
            let err = DateWindow::parse(raw, None).unwrap_err();
            assert!(
                matches!(err, EvstatError::InvalidDate { field: "start date", .. }),
                "Expected InvalidDate for {:?}, got {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_unparseable_end_is_invalid_date() {
        let err = DateWindow::parse("2024-01-10", Some("soon")).unwrap_err();
        assert!(matches!(err, EvstatError::InvalidDate { field: "end date", .. }));
    }

    #[test]
    fn test_blank_end_means_single_day() {
        let blank = DateWindow::parse("2024-01-10", Some("")).unwrap();
        let absent = DateWindow::parse("2024-01-10", None).unwrap();
        assert_eq!(blank, absent);
    }

    #[test]
    fn test_time_of_day_is_discarded() {
        let window = DateWindow::parse("2024-01-10T18:30:00", Some("2024-01-11 09:00")).unwrap();

        assert_eq!(window.start(), at(2024, 1, 10, 0, 0, 0));
        assert_eq!(window.end_date(), date(2024, 1, 11));
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = Some(date(2024, 1, 10));

        assert_eq!(parse_date("2024-01-10"), expected);
        assert_eq!(parse_date(" 2024-01-10 "), expected);
        assert_eq!(parse_date("2024-01-10T08:15"), expected);
        assert_eq!(parse_date("2024-01-10T08:15:30.250"), expected);
        assert_eq!(parse_date("2024-01-10 08:15:30"), expected);
        assert_eq!(parse_date("2024-01-10T23:30:00-05:00"), expected);
        assert_eq!(parse_date("2024-01-10 23:30:00+00"), expected);
    }

    #[test]
    fn test_parse_instant_keeps_time() {
        assert_eq!(parse_instant("2024-01-10T12:00:00"), Some(at(2024, 1, 10, 12, 0, 0)));
        assert_eq!(parse_instant("2024-01-10"), Some(at(2024, 1, 10, 0, 0, 0)));
        assert_eq!(parse_instant("2024-01-10T12:00:00+02:00"), Some(at(2024, 1, 10, 12, 0, 0)));
        assert_eq!(parse_instant("noon"), None);
    }

    #[test]
    fn test_end_of_max_date_does_not_overflow() {
        let window = DateWindow::new(NaiveDate::MAX, None).unwrap();
        assert_eq!(window.end(), NaiveDateTime::MAX);
    }
}
