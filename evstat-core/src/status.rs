//! Event lifecycle status relative to a reference instant.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::date_window::DateWindow;
use crate::error::EvstatResult;

/// Where an event sits relative to `now`. Derived on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Upcoming,
    #[serde(alias = "live")]
    Ongoing,
    #[serde(alias = "ended")]
    Past,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Upcoming, Status::Ongoing, Status::Past];

    pub fn is_past(self) -> bool {
        self == Status::Past
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Upcoming => "upcoming",
            Status::Ongoing => "ongoing",
            Status::Past => "past",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Status::Upcoming),
            "ongoing" | "live" => Ok(Status::Ongoing),
            "past" | "ended" => Ok(Status::Past),
            _ => Err(format!(
                "Unknown status '{}'. Expected upcoming, ongoing or past",
                s
            )),
        }
    }
}

/// Classify the day-granular window `[start, end ?? start]` against `now`.
///
/// Fails only when the window itself is malformed (end before start).
pub fn classify(now: NaiveDateTime, start: NaiveDate, end: Option<NaiveDate>) -> EvstatResult<Status> {
    Ok(DateWindow::new(start, end)?.classify(now))
}

/// Which statuses a listing should keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Upcoming,
    Ongoing,
    Past,
}

impl StatusFilter {
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Upcoming => status == Status::Upcoming,
            StatusFilter::Ongoing => status == Status::Ongoing,
            StatusFilter::Past => status == Status::Past,
        }
    }
}

impl From<Status> for StatusFilter {
    fn from(status: Status) -> Self {
        match status {
            Status::Upcoming => StatusFilter::Upcoming,
            Status::Ongoing => StatusFilter::Ongoing,
            Status::Past => StatusFilter::Past,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Upcoming => f.write_str(Status::Upcoming.as_str()),
            StatusFilter::Ongoing => f.write_str(Status::Ongoing.as_str()),
            StatusFilter::Past => f.write_str(Status::Past.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<Status>().map(StatusFilter::from).map_err(|_| {
            format!(
                "Unknown status filter '{}'. Expected all, upcoming, ongoing or past",
                s
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvstatError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn test_classify_branches() {
        let start = date(2024, 1, 5);
        let end = Some(date(2024, 1, 6));

        assert_eq!(classify(at(2024, 1, 4, 23, 59, 59), start, end).unwrap(), Status::Upcoming);
        assert_eq!(classify(at(2024, 1, 5, 0, 0, 0), start, end).unwrap(), Status::Ongoing);
        assert_eq!(classify(at(2024, 1, 6, 23, 59, 59), start, end).unwrap(), Status::Ongoing);
        assert_eq!(classify(at(2024, 1, 7, 0, 0, 0), start, end).unwrap(), Status::Past);
    }

    #[test]
    fn test_same_day_event_stays_ongoing_all_day() {
        let today = date(2024, 1, 10);

        assert_eq!(classify(at(2024, 1, 10, 0, 0, 1), today, Some(today)).unwrap(), Status::Ongoing);
        assert_eq!(classify(at(2024, 1, 10, 23, 59, 58), today, Some(today)).unwrap(), Status::Ongoing);
        assert_eq!(classify(at(2024, 1, 11, 0, 0, 1), today, Some(today)).unwrap(), Status::Past);
    }

    #[test]
    fn test_classify_inverted_window_fails() {
        let result = classify(at(2024, 1, 10, 12, 0, 0), date(2024, 1, 10), Some(date(2024, 1, 1)));
        assert!(matches!(result, Err(EvstatError::InvertedWindow { .. })));
    }

    #[test]
    fn test_status_parses_page_aliases() {
        assert_eq!("live".parse::<Status>().unwrap(), Status::Ongoing);
        assert_eq!("Ended".parse::<Status>().unwrap(), Status::Past);
        assert_eq!(" upcoming ".parse::<Status>().unwrap(), Status::Upcoming);
        assert!("soon".parse::<Status>().is_err());
    }

    #[test]
    fn test_parse_error_echoes_input_as_typed() {
        let err = "Soon ".parse::<Status>().unwrap_err();
        assert!(err.contains("'Soon '"), "{err}");

        let err = "Weekly".parse::<StatusFilter>().unwrap_err();
        assert!(err.contains("'Weekly'"), "{err}");
        assert!(err.contains("all, upcoming"), "{err}");
    }

    #[test]
    fn test_status_serde_uses_lowercase_and_aliases() {
        assert_eq!(serde_json::to_string(&Status::Ongoing).unwrap(), r#""ongoing""#);
        assert_eq!(serde_json::from_str::<Status>(r#""live""#).unwrap(), Status::Ongoing);
        assert_eq!(serde_json::from_str::<Status>(r#""ended""#).unwrap(), Status::Past);
    }

    #[test]
    fn test_status_filter() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("live".parse::<StatusFilter>().unwrap(), StatusFilter::Ongoing);
        assert_eq!(StatusFilter::default(), StatusFilter::All);

        for status in Status::ALL {
            assert!(StatusFilter::All.matches(status));
            assert!(StatusFilter::from(status).matches(status));
        }
        assert!(!StatusFilter::Past.matches(Status::Ongoing));
        assert_eq!(StatusFilter::Upcoming.to_string(), "upcoming");
    }
}
