//! Listing order for events: current and future first, then past, each by start date.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, warn};

use crate::date_window::DateWindow;
use crate::error::EvstatError;
use crate::event::Event;
use crate::status::Status;

/// An event with its window and status, computed against one `now`.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedEvent<'a> {
    #[serde(flatten)]
    pub event: &'a Event,
    #[serde(skip)]
    pub window: DateWindow,
    pub status: Status,
}

/// An event whose dates could not be turned into a window.
#[derive(Debug)]
pub struct RejectedEvent<'a> {
    pub event: &'a Event,
    pub error: EvstatError,
}

/// Result of one classification pass over a collection.
#[derive(Debug, Default)]
pub struct Classified<'a> {
    /// Valid events in listing order
    pub entries: Vec<ClassifiedEvent<'a>>,
    /// Events that need attention, in input order
    pub rejected: Vec<RejectedEvent<'a>>,
}

impl<'a> Classified<'a> {
    pub fn events(&self) -> Vec<&'a Event> {
        self.entries.iter().map(|c| c.event).collect()
    }
}

/// Classify every event against the same `now` and put the valid ones in
/// listing order.
///
/// Ordering: not-past before past, then by start date. The sort is stable, so
/// events with the same start date and past-ness keep their input order.
/// Malformed events are set aside in `rejected` and never affect the order of
/// the others.
pub fn classify_events(events: &[Event], now: NaiveDateTime) -> Classified<'_> {
    let mut classified = Classified::default();

    for event in events {
        match DateWindow::for_event(event) {
            Ok(window) => classified.entries.push(ClassifiedEvent {
                event,
                window,
                status: window.classify(now),
            }),
            Err(error) => {
                warn!(event_id = %event.id, title = %event.title, %error, "Skipping event with malformed dates");
                classified.rejected.push(RejectedEvent { event, error });
            }
        }
    }

    classified
        .entries
        .sort_by_key(|c| (c.status.is_past(), c.window.start()));

    debug!(
        %now,
        classified = classified.entries.len(),
        rejected = classified.rejected.len(),
        "Classified events"
    );

    classified
}

/// Events in listing order, classified against a single `now`.
pub fn sort_events(events: &[Event], now: NaiveDateTime) -> Vec<&Event> {
    classify_events(events, now).events()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_sort_scenario() {
        let events = vec![
            Event::new("A", "Open day", "2024-01-10"),
            Event::new("B", "Winter fair", "2024-01-05").with_end_date("2024-01-06"),
            Event::new("C", "Gold expo", "2024-02-01"),
        ];

        let classified = classify_events(&events, at(2024, 1, 10, 12));
        let statuses: Vec<_> = classified.entries.iter().map(|c| (c.event.id.as_str(), c.status)).collect();

        assert_eq!(
            statuses,
            vec![("A", Status::Ongoing), ("C", Status::Upcoming), ("B", Status::Past)]
        );
        assert_eq!(ids(&sort_events(&events, at(2024, 1, 10, 12))), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_past_events_sort_by_start_ascending() {
        let events = vec![
            Event::new("late", "Late", "2023-12-20"),
            Event::new("early", "Early", "2023-11-01"),
            Event::new("next", "Next", "2024-03-01"),
        ];

        let sorted = sort_events(&events, at(2024, 1, 1, 9));

        assert_eq!(ids(&sorted), vec!["next", "early", "late"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let events = vec![
            Event::new("3", "Third", "2024-05-01"),
            Event::new("1", "First", "2024-05-01"),
            Event::new("2", "Second", "2024-05-01").with_end_date("2024-05-01"),
        ];

        let sorted = sort_events(&events, at(2024, 4, 1, 0));

        assert_eq!(ids(&sorted), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_malformed_events_are_rejected_without_disturbing_order() {
        let good = vec![
            Event::new("b", "B", "2024-02-01"),
            Event::new("a", "A", "2024-01-15"),
        ];
        let mut mixed = good.clone();
        mixed.insert(1, Event::new("bad-start", "Bad", "someday"));
        mixed.push(Event::new("inverted", "Inverted", "2024-03-10").with_end_date("2024-03-01"));

        let now = at(2024, 1, 1, 8);
        let classified = classify_events(&mixed, now);

        assert_eq!(ids(&classified.events()), ids(&sort_events(&good, now)));
        assert_eq!(classified.rejected.len(), 2);
        assert_eq!(classified.rejected[0].event.id, "bad-start");
        assert!(matches!(classified.rejected[0].error, EvstatError::InvalidDate { .. }));
        assert!(matches!(classified.rejected[1].error, EvstatError::InvertedWindow { .. }));
    }

    #[test]
    fn test_empty_input() {
        let classified = classify_events(&[], at(2024, 1, 1, 0));
        assert!(classified.entries.is_empty());
        assert!(classified.rejected.is_empty());
    }

    #[test]
    fn test_classified_event_serializes_with_status() {
        let events = vec![Event::new("7", "Tasting", "2024-01-10")];
        let classified = classify_events(&events, at(2024, 1, 10, 12));

        let json = serde_json::to_value(&classified.entries[0]).unwrap();

        assert_eq!(json["id"], "7");
        assert_eq!(json["title"], "Tasting");
        assert_eq!(json["status"], "ongoing");
    }
}
