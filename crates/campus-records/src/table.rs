//! Client-side filtering and sorting for the student and module tables.
//!
//! Filtering is a case-insensitive substring match over the visible text
//! columns. Sorting is stable, so rows that compare equal keep the order the
//! backend returned them in.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::RecordsError;
use crate::models::{Module, Student};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentColumn {
    FirstName,
    LastName,
    Email,
    Average,
}

impl FromStr for StudentColumn {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nome" | "first-name" | "first_name" => Ok(StudentColumn::FirstName),
            "cognome" | "last-name" | "last_name" => Ok(StudentColumn::LastName),
            "email" => Ok(StudentColumn::Email),
            "media" | "average" => Ok(StudentColumn::Average),
            _ => Err(RecordsError::UnknownSortKey {
                key: s.to_string(),
                available: "nome, cognome, email, media",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleColumn {
    Code,
    Name,
    Hours,
}

impl FromStr for ModuleColumn {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "codice" | "code" => Ok(ModuleColumn::Code),
            "nome" | "name" => Ok(ModuleColumn::Name),
            "ore" | "hours" => Ok(ModuleColumn::Hours),
            _ => Err(RecordsError::UnknownSortKey {
                key: s.to_string(),
                available: "codice, nome, ore",
            }),
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Order two optional keys so that missing values land last in either
/// direction.
fn cmp_missing_last<T>(
    a: Option<T>,
    b: Option<T>,
    order: SortOrder,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => order.apply(cmp(&x, &y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter and sort settings for the student table.
#[derive(Debug, Clone, Default)]
pub struct StudentQuery {
    pub filter: Option<String>,
    pub sort: Option<StudentColumn>,
    pub order: SortOrder,
}

impl StudentQuery {
    /// True when `student` passes the text filter (always, when none is set).
    pub fn matches(&self, student: &Student) -> bool {
        let Some(needle) = self.filter.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        contains_ci(&student.first_name, &needle)
            || contains_ci(&student.last_name, &needle)
            || student
                .email
                .as_deref()
                .is_some_and(|email| contains_ci(email, &needle))
    }

    pub fn apply<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        let mut rows: Vec<&Student> = students.iter().filter(|s| self.matches(s)).collect();
        let Some(column) = self.sort else {
            return rows;
        };
        let order = self.order;
        rows.sort_by(|a, b| match column {
            StudentColumn::FirstName => order.apply(cmp_text(&a.first_name, &b.first_name)),
            StudentColumn::LastName => order.apply(cmp_text(&a.last_name, &b.last_name)),
            StudentColumn::Email => {
                cmp_missing_last(a.email.as_deref(), b.email.as_deref(), order, |x, y| {
                    cmp_text(x, y)
                })
            }
            StudentColumn::Average => {
                cmp_missing_last(a.average_grade(), b.average_grade(), order, |x, y| {
                    x.total_cmp(y)
                })
            }
        });
        rows
    }
}

/// Filter and sort settings for the module table.
#[derive(Debug, Clone, Default)]
pub struct ModuleQuery {
    pub filter: Option<String>,
    pub sort: Option<ModuleColumn>,
    pub order: SortOrder,
}

impl ModuleQuery {
    pub fn matches(&self, module: &Module) -> bool {
        let Some(needle) = self.filter.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
            return true;
        };
        let needle = needle.to_lowercase();
        contains_ci(&module.code, &needle)
            || contains_ci(&module.name, &needle)
            || module
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, &needle))
    }

    pub fn apply<'a>(&self, modules: &'a [Module]) -> Vec<&'a Module> {
        let mut rows: Vec<&Module> = modules.iter().filter(|m| self.matches(m)).collect();
        let Some(column) = self.sort else {
            return rows;
        };
        let order = self.order;
        rows.sort_by(|a, b| match column {
            ModuleColumn::Code => order.apply(cmp_text(&a.code, &b.code)),
            ModuleColumn::Name => order.apply(cmp_text(&a.name, &b.name)),
            ModuleColumn::Hours => cmp_missing_last(a.hours, b.hours, order, |x, y| x.cmp(y)),
        });
        rows
    }
}
