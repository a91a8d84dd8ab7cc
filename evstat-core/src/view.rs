//! Filtered projections of an event collection for listing pages.

use std::num::NonZeroUsize;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::event::Event;
use crate::sort::{ClassifiedEvent, RejectedEvent, classify_events};
use crate::status::{Status, StatusFilter};

/// Events matching `filter`, in listing order.
///
/// Every event is classified once against `now`, so an event can never land in
/// two buckets within one call. With `StatusFilter::All` this is exactly
/// `sort_events`.
pub fn filter_events(events: &[Event], now: NaiveDateTime, filter: StatusFilter) -> Vec<&Event> {
    classify_events(events, now)
        .entries
        .into_iter()
        .filter(|c| filter.matches(c.status))
        .map(|c| c.event)
        .collect()
}

/// Number of events per status, used for filter tab badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub upcoming: usize,
    pub ongoing: usize,
    pub past: usize,
}

impl StatusCounts {
    pub fn add(&mut self, status: Status) {
        match status {
            Status::Upcoming => self.upcoming += 1,
            Status::Ongoing => self.ongoing += 1,
            Status::Past => self.past += 1,
        }
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Upcoming => self.upcoming,
            Status::Ongoing => self.ongoing,
            Status::Past => self.past,
        }
    }

    pub fn total(&self) -> usize {
        self.upcoming + self.ongoing + self.past
    }
}

impl<'a, 'b> FromIterator<&'b ClassifiedEvent<'a>> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = &'b ClassifiedEvent<'a>>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for entry in iter {
            counts.add(entry.status);
        }
        counts
    }
}

/// A listing request: status tab, search box, category chip and page.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub status: StatusFilter,
    /// Case-insensitive substring over title, location, category and description
    pub search: Option<String>,
    /// Case-insensitive exact category
    pub category: Option<String>,
    pub offset: usize,
    /// None means no limit
    pub limit: Option<NonZeroUsize>,
}

/// One page of a listing.
#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    pub events: Vec<ClassifiedEvent<'a>>,
    /// Matches before pagination
    pub total: usize,
    pub has_more: bool,
    /// Per-status counts after search and category, before the status filter
    pub counts: StatusCounts,
    #[serde(skip)]
    pub rejected: Vec<RejectedEvent<'a>>,
}

impl EventQuery {
    pub fn new(status: StatusFilter) -> Self {
        EventQuery {
            status,
            ..Default::default()
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn page(mut self, offset: usize, limit: NonZeroUsize) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    /// Run the query against one `now` snapshot.
    pub fn run<'a>(&self, events: &'a [Event], now: NaiveDateTime) -> Listing<'a> {
        let classified = classify_events(events, now);

        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let visible: Vec<ClassifiedEvent<'a>> = classified
            .entries
            .into_iter()
            .filter(|c| needle.as_deref().is_none_or(|n| matches_search(c.event, n)))
            .filter(|c| category.is_none_or(|cat| matches_category(c.event, cat)))
            .collect();

        let counts: StatusCounts = visible.iter().collect();

        let matching: Vec<ClassifiedEvent<'a>> = visible
            .into_iter()
            .filter(|c| self.status.matches(c.status))
            .collect();

        let total = matching.len();
        let events: Vec<ClassifiedEvent<'a>> = matching
            .into_iter()
            .skip(self.offset)
            .take(self.limit.map_or(usize::MAX, NonZeroUsize::get))
            .collect();
        let has_more = self.offset.saturating_add(events.len()) < total;

        Listing {
            events,
            total,
            has_more,
            counts,
            rejected: classified.rejected,
        }
    }
}

fn matches_search(event: &Event, needle: &str) -> bool {
    event
        .searchable_fields()
        .any(|field| field.to_lowercase().contains(needle))
}

fn matches_category(event: &Event, category: &str) -> bool {
    event
        .category
        .as_deref()
        .is_some_and(|c| c.trim().eq_ignore_ascii_case(category))
}
