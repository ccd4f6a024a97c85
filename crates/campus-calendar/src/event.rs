//! Calendar event records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::TimeRange;

/// Kind of scheduled activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Lecture,
    Exam,
    Lab,
    Break,
    Internship,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Lecture => "lecture",
            EventType::Exam => "exam",
            EventType::Lab => "lab",
            EventType::Break => "break",
            EventType::Internship => "internship",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lecture" => Ok(EventType::Lecture),
            "exam" => Ok(EventType::Exam),
            "lab" => Ok(EventType::Lab),
            "break" => Ok(EventType::Break),
            "internship" => Ok(EventType::Internship),
            other => Err(format!(
                "unknown event type '{}' (expected lecture, exam, lab, break or internship)",
                other
            )),
        }
    }
}

/// A scheduled calendar entry.
///
/// `time` is kept as the free text the user typed (`"09:00 - 13:00"`); it is
/// only interpreted when an overlap check needs it. Events are never edited
/// after they are stored, only removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub time: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: EventType,
    pub date: NaiveDate,
}

impl Event {
    pub fn new(
        title: impl Into<String>,
        time: impl Into<String>,
        description: impl Into<String>,
        kind: EventType,
        date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
            description: description.into(),
            kind,
            date,
        }
    }

    /// The parsed time range, or `None` when `time` is malformed.
    pub fn range(&self) -> Option<TimeRange> {
        TimeRange::parse(&self.time)
    }
}
