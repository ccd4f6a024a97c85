//! # campus-calendar
//!
//! Calendar events for a school administration front end: lectures, exams,
//! labs, breaks and internships, each pinned to a date with a free-text
//! `"HH:MM - HH:MM"` time range.
//!
//! The central check is whether a new event overlaps anything already stored
//! on the same day. Time ranges are half-open, so back-to-back events do not
//! clash, and a time that cannot be parsed never blocks data entry.
//!
//! ## Modules
//!
//! - [`time`] — clock-time parsing and half-open minute ranges
//! - [`event`] — the `Event` record and its type
//! - [`conflict`] — overlap predicate and conflict report
//! - [`agenda`] — the ordered list of events for one day
//! - [`freebusy`] — free gaps in a day window
//! - [`store`] — JSON-file event storage
//! - [`error`] — Error types

pub mod agenda;
pub mod conflict;
pub mod error;
pub mod event;
pub mod freebusy;
pub mod store;
pub mod time;

pub use agenda::agenda;
pub use conflict::{events_overlap, find_conflicts, has_overlap, Conflict};
pub use error::CalendarError;
pub use event::{Event, EventType};
pub use freebusy::{find_first_free_slot, find_free_slots, DayWindow, FreeSlot};
pub use store::EventStore;
pub use time::{parse_time, TimeRange};
