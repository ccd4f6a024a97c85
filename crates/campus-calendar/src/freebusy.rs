//! Compute free time slots within a day.
//!
//! Collects the parseable events on the requested date, merges overlapping busy
//! periods, then computes the gaps between merged periods within a day window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};
use crate::event::Event;
use crate::time::{format_minutes, parse_time, TimeRange};

/// The part of the day to search, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: u32,
    pub end: u32,
}

impl DayWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Build a window from two clock times such as `"08:00"` and `"18:00"`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTime` if either bound has no clock time
    /// or the window does not end after it starts.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let to_minutes = |token: &str| {
            parse_time(token)
                .map(|(h, m)| h * 60 + m)
                .ok_or_else(|| CalendarError::InvalidTime(token.to_string()))
        };
        let window = Self::new(to_minutes(start)?, to_minutes(end)?);
        if window.start >= window.end {
            return Err(CalendarError::InvalidTime(format!(
                "window {} - {} is empty",
                start, end
            )));
        }
        Ok(window)
    }
}

impl Default for DayWindow {
    /// 08:00 - 18:00, the teaching day.
    fn default() -> Self {
        Self {
            start: 8 * 60,
            end: 18 * 60,
        }
    }
}

/// A free time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: u32,
    pub end: u32,
    pub duration_minutes: u32,
}

impl std::fmt::Display for FreeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({} min)",
            format_minutes(self.start),
            format_minutes(self.end),
            self.duration_minutes
        )
    }
}

/// Merge overlapping or adjacent busy periods on `date`, clipped to the window.
///
/// Returns a sorted, non-overlapping list of ranges. Malformed and empty ranges
/// are skipped.
pub fn merge_busy_periods(events: &[Event], date: NaiveDate, window: DayWindow) -> Vec<TimeRange> {
    let mut intervals: Vec<TimeRange> = events
        .iter()
        .filter(|e| e.date == date)
        .filter_map(Event::range)
        .filter(|r| !r.is_empty() && r.start < window.end && r.end > window.start)
        .map(|r| TimeRange::new(r.start.max(window.start), r.end.min(window.end)))
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<TimeRange> = Vec::new();
    for range in intervals {
        if let Some(last) = merged.last_mut() {
            if range.start <= last.end {
                // Overlapping or adjacent: extend the current interval.
                last.end = last.end.max(range.end);
                continue;
            }
        }
        merged.push(range);
    }

    merged
}

/// Find free time slots on `date` within `window`, given the stored events.
///
/// Events may overlap; overlapping busy periods are merged before computing
/// gaps. Returns free slots sorted by start time.
pub fn find_free_slots(events: &[Event], date: NaiveDate, window: DayWindow) -> Vec<FreeSlot> {
    let merged = merge_busy_periods(events, date, window);

    let mut free_slots = Vec::new();
    let mut cursor = window.start;

    for busy in &merged {
        if cursor < busy.start {
            free_slots.push(FreeSlot {
                start: cursor,
                end: busy.start,
                duration_minutes: busy.start - cursor,
            });
        }
        cursor = cursor.max(busy.end);
    }

    if cursor < window.end {
        free_slots.push(FreeSlot {
            start: cursor,
            end: window.end,
            duration_minutes: window.end - cursor,
        });
    }

    free_slots
}

/// Find the first free slot of at least `min_duration_minutes` on `date`.
pub fn find_first_free_slot(
    events: &[Event],
    date: NaiveDate,
    window: DayWindow,
    min_duration_minutes: u32,
) -> Option<FreeSlot> {
    find_free_slots(events, date, window)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}
