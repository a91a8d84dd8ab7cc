//! Core types for evstat.
//!
//! Classifies calendar-bound events as upcoming, ongoing or past relative to
//! a caller-supplied `now`, and produces the ordered listings shown on event
//! pages:
//! - `DateWindow` normalizes a start/end date pair into a day-granular interval
//! - `classify` maps a window and `now` to a `Status`
//! - `sort_events` / `filter_events` order and filter a collection
//! - `EventQuery` adds search, category and pagination on top

pub mod date_window;
pub mod error;
pub mod event;
pub mod sort;
pub mod source;
pub mod status;
pub mod view;

pub use date_window::DateWindow;
pub use error::{EvstatError, EvstatResult};
pub use event::Event;
pub use sort::{Classified, ClassifiedEvent, RejectedEvent, classify_events, sort_events};
pub use source::{EventSource, JsonFileSource, StaticSource};
pub use status::{Status, StatusFilter, classify};
pub use view::{EventQuery, Listing, StatusCounts, filter_events};
