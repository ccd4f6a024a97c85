//! # campus-records
//!
//! Student, module and exam records for a school administration front end,
//! in the JSON shape the REST backend returns them.
//!
//! ## Modules
//!
//! - [`models`] — `Student`, `Module`, `Exam` and their wire names
//! - [`stats`] — average grade, high grades, grade summary
//! - [`enrollment`] — enroll / withdraw, keeping both sides consistent
//! - [`table`] — filter and sort for the student and module tables
//! - [`error`] — Error types

pub mod enrollment;
pub mod error;
pub mod models;
pub mod stats;
pub mod table;

pub use enrollment::{enroll, withdraw};
pub use error::RecordsError;
pub use models::{
    find_module, find_module_mut, find_student, find_student_mut, parse_modules, parse_students,
    EnrolledStudent, Exam, Module, ModuleSnapshot, Student,
};
pub use stats::{GradeSummary, DEFAULT_HIGH_GRADE};
pub use table::{ModuleColumn, ModuleQuery, SortOrder, StudentColumn, StudentQuery};
