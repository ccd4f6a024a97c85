//! Detect overlapping events on the same day.
//!
//! Two events conflict when they share a date and their parsed time ranges
//! intersect as half-open intervals. Adjacent events (where one ends exactly
//! when another starts) are NOT conflicts. An event whose `time` cannot be
//! parsed, or whose range is empty, never conflicts with anything.

use crate::event::Event;

/// An existing event the candidate collides with.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict<'a> {
    /// Position of the existing event in the slice that was searched.
    pub index: usize,
    pub existing: &'a Event,
    pub overlap_minutes: u32,
}

/// True when `a` and `b` fall on the same date and their time ranges intersect.
///
/// Symmetric: `events_overlap(a, b) == events_overlap(b, a)`.
pub fn events_overlap(a: &Event, b: &Event) -> bool {
    if a.date != b.date {
        return false;
    }
    match (a.range(), b.range()) {
        (Some(ra), Some(rb)) => ra.overlaps(&rb),
        _ => false,
    }
}

/// Decide whether `candidate` intersects any event in `existing` on the same date.
///
/// Returns on the first overlapping event. Returns `false` when there are no
/// same-date peers or when the candidate's own time range cannot be parsed.
///
/// ```
/// use campus_calendar::{has_overlap, Event, EventType};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let stored = vec![Event::new("Angular", "09:00 - 13:00", "", EventType::Lecture, date)];
///
/// let late = Event::new("Lunch", "12:30 - 14:00", "", EventType::Break, date);
/// assert!(has_overlap(&late, &stored));
///
/// let after = Event::new("Lunch", "13:00 - 14:00", "", EventType::Break, date);
/// assert!(!has_overlap(&after, &stored));
/// ```
pub fn has_overlap(candidate: &Event, existing: &[Event]) -> bool {
    let Some(range) = candidate.range() else {
        return false;
    };
    existing
        .iter()
        .filter(|e| e.date == candidate.date)
        .filter_map(Event::range)
        .any(|r| range.overlaps(&r))
}

/// Find every same-date event in `existing` that `candidate` overlaps.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
/// The result is empty exactly when [`has_overlap`] returns `false`.
pub fn find_conflicts<'a>(candidate: &Event, existing: &'a [Event]) -> Vec<Conflict<'a>> {
    let Some(range) = candidate.range() else {
        return Vec::new();
    };

    let mut conflicts = Vec::new();
    for (index, event) in existing.iter().enumerate() {
        if event.date != candidate.date {
            continue;
        }
        let Some(other) = event.range() else {
            continue;
        };
        if range.overlaps(&other) {
            conflicts.push(Conflict {
                index,
                existing: event,
                overlap_minutes: range.overlap_minutes(&other),
            });
        }
    }

    conflicts
}
