//! The list of events shown for a selected day.

use chrono::NaiveDate;

use crate::event::Event;

/// Events on `date`, ordered for display.
///
/// Events with a parseable time come first, sorted by start then end. Events
/// with a malformed `time` follow in the order they were stored.
pub fn agenda(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    let (mut timed, untimed): (Vec<&Event>, Vec<&Event>) = events
        .iter()
        .filter(|e| e.date == date)
        .partition(|e| e.range().is_some());

    // `sort_by_key` is stable, so same-slot events keep their stored order.
    timed.sort_by_key(|e| e.range().map(|r| (r.start, r.end)));
    timed.extend(untimed);
    timed
}
