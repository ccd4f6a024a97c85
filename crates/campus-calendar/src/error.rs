//! Error types for campus-calendar operations.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid event data: {0}")]
    Json(#[from] serde_json::Error),

    /// The event was refused because it overlaps stored events on the same date.
    #[error("'{title}' on {date} overlaps {}", .clashes.join(", "))]
    Overlap {
        title: String,
        date: chrono::NaiveDate,
        clashes: Vec<String>,
    },

    #[error("No event at position {index} (store holds {len})")]
    NoSuchEvent { index: usize, len: usize },

    #[error("Invalid time: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
