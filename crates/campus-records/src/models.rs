//! Record shapes as the course-administration backend serves them.
//!
//! Field names on the wire are the backend's (`nome`, `cognome`,
//! `moduliIscritti`, ...); the Rust side uses English names. Unknown fields are
//! ignored and missing lists default to empty, so partial payloads from older
//! backend versions still load.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RecordsError, Result};

/// A copy of a module embedded in an exam record.
///
/// The snapshot is taken when the exam is recorded, so it survives later
/// edits or deletion of the module itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    #[serde(rename = "codice")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "ore", default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    #[serde(rename = "descrizione", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One sitting of an exam and its grade.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Exam {
    #[serde(
        rename = "data",
        default,
        with = "exam_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(rename = "voto", default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u32>,
    #[serde(rename = "note", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "modulo", default, skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "cognome")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Codes of the modules the student is enrolled in.
    #[serde(rename = "moduliIscritti", default)]
    pub modules: Vec<String>,
    #[serde(rename = "esami", default)]
    pub exams: Vec<Exam>,
}

impl Student {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            modules: Vec::new(),
            exams: Vec::new(),
        }
    }

    /// `"Nome Cognome"`, the label used in module rosters.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A student as listed on a module's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledStudent {
    /// Null when the student record no longer exists.
    #[serde(rename = "studente_id", default)]
    pub student_id: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "codice")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "ore", default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    #[serde(rename = "descrizione", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "studentiIscritti", default)]
    pub enrolled: Vec<EnrolledStudent>,
}

impl Module {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            code: code.into(),
            name: name.into(),
            hours: None,
            description: None,
            enrolled: Vec::new(),
        }
    }

    /// The snapshot embedded in exams taken for this module.
    pub fn snapshot(&self) -> ModuleSnapshot {
        ModuleSnapshot {
            code: self.code.clone(),
            name: self.name.clone(),
            hours: self.hours,
            description: self.description.clone(),
        }
    }
}

/// Parse a `GET /studenti/` payload.
pub fn parse_students(json: &str) -> Result<Vec<Student>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a `GET /modulo/` payload.
pub fn parse_modules(json: &str) -> Result<Vec<Module>> {
    Ok(serde_json::from_str(json)?)
}

/// Look a student up by backend id.
pub fn find_student<'a>(students: &'a [Student], id: &str) -> Result<&'a Student> {
    students
        .iter()
        .find(|s| s.id.as_deref() == Some(id))
        .ok_or_else(|| RecordsError::StudentNotFound(id.to_string()))
}

/// Look a module up by its code.
pub fn find_module<'a>(modules: &'a [Module], code: &str) -> Result<&'a Module> {
    modules
        .iter()
        .find(|m| m.code == code)
        .ok_or_else(|| RecordsError::ModuleNotFound(code.to_string()))
}

pub fn find_student_mut<'a>(students: &'a mut [Student], id: &str) -> Result<&'a mut Student> {
    students
        .iter_mut()
        .find(|s| s.id.as_deref() == Some(id))
        .ok_or_else(|| RecordsError::StudentNotFound(id.to_string()))
}

pub fn find_module_mut<'a>(modules: &'a mut [Module], code: &str) -> Result<&'a mut Module> {
    modules
        .iter_mut()
        .find(|m| m.code == code)
        .ok_or_else(|| RecordsError::ModuleNotFound(code.to_string()))
}

/// Exam dates arrive either as `YYYY-MM-DD`, as an RFC 3339 timestamp, or in
/// the RFC 2822 form the backend's JSON encoder emits for date fields
/// (`"Sun, 01 Jun 2025 00:00:00 GMT"`). They are always written back as
/// `YYYY-MM-DD`.
mod exam_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(d)? else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Some(dt.date_naive()));
        }
        // chrono's RFC 2822 parser accepts the "GMT" zone name.
        DateTime::parse_from_rfc2822(raw)
            .map(|dt| Some(dt.date_naive()))
            .map_err(|_| de::Error::custom(format!("unrecognized exam date '{}'", raw)))
    }
}
