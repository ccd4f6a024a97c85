//! Error types for campus-records operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Invalid record data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Unknown sort column '{key}'. Available: {available}")]
    UnknownSortKey { key: String, available: &'static str },
}

pub type Result<T> = std::result::Result<T, RecordsError>;
