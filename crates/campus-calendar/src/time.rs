//! Time-of-day parsing for the free-text `"HH:MM - HH:MM"` field of an event.
//!
//! Parsing never fails loudly: a token without a recognizable clock time yields
//! `None`, and callers treat that as "cannot determine overlap".

use std::sync::LazyLock;

use regex::Regex;

/// 1-2 digits, a colon, exactly 2 digits. Matched anywhere in the token.
static CLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,2}):([0-9]{2})").expect("clock pattern is valid"));

/// Extract the first `H:MM` / `HH:MM` clock time from `token`.
///
/// Returns the raw `(hour, minute)` pair. No range check is applied, so
/// `"24:00"` parses as `(24, 0)`.
///
/// # Examples
///
/// ```
/// use campus_calendar::parse_time;
///
/// assert_eq!(parse_time("09:30"), Some((9, 30)));
/// assert_eq!(parse_time(" 7:05 "), Some((7, 5)));
/// assert_eq!(parse_time("noon"), None);
/// ```
pub fn parse_time(token: &str) -> Option<(u32, u32)> {
    let caps = CLOCK_PATTERN.captures(token)?;
    let hour = caps.get(1)?.as_str().parse().ok()?;
    let minute = caps.get(2)?.as_str().parse().ok()?;
    Some((hour, minute))
}

/// A parsed time range on a single day, in minutes since midnight.
///
/// The range is half-open: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    /// Build a range from two minute offsets.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Parse an event's `time` field.
    ///
    /// The field must split on `-` into exactly two parts, each containing a
    /// clock time recognized by [`parse_time`].
    ///
    /// ```
    /// use campus_calendar::TimeRange;
    ///
    /// let range = TimeRange::parse("09:00 - 13:00").unwrap();
    /// assert_eq!((range.start, range.end), (540, 780));
    /// assert!(TimeRange::parse("09:00").is_none());
    /// ```
    pub fn parse(time: &str) -> Option<Self> {
        let mut parts = time.split('-');
        let (start, end) = (parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let (sh, sm) = parse_time(start)?;
        let (eh, em) = parse_time(end)?;
        Some(Self {
            start: sh * 60 + sm,
            end: eh * 60 + em,
        })
    }

    /// Length in minutes, zero for empty or inverted ranges.
    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// True when the range covers no minute at all (zero-length or inverted).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Half-open intersection test.
    ///
    /// Empty ranges never overlap anything, so the relation is symmetric and
    /// adjacent ranges (one ends where the other starts) do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.start < other.end && self.end > other.start
    }

    /// Minutes shared with `other`, zero when they do not overlap.
    pub fn overlap_minutes(&self, other: &TimeRange) -> u32 {
        if !self.overlaps(other) {
            return 0;
        }
        self.end.min(other.end) - self.start.max(other.start)
    }
}

/// Render minutes since midnight as `HH:MM`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            format_minutes(self.start),
            format_minutes(self.end)
        )
    }
}
