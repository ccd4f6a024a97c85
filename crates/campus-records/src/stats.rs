//! Grade statistics for a student's exam record.
//!
//! These back the per-student `media` (average) and `voti-alti` (high grades)
//! views. Exams without a recorded grade are ignored throughout.

use serde::Serialize;

use crate::models::{Exam, Student};

/// Grades at or above this mark count as high (Italian 18-30 scale).
pub const DEFAULT_HIGH_GRADE: u32 = 27;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSummary {
    pub graded_exams: usize,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub average: Option<f64>,
}

impl Student {
    fn grades(&self) -> impl Iterator<Item = u32> + '_ {
        self.exams.iter().filter_map(|e| e.grade)
    }

    /// Mean of the recorded grades, `None` when no exam has a grade.
    pub fn average_grade(&self) -> Option<f64> {
        let (sum, count) = self
            .grades()
            .fold((0u64, 0u32), |(sum, n), g| (sum + u64::from(g), n + 1));
        if count == 0 {
            return None;
        }
        Some(sum as f64 / f64::from(count))
    }

    /// Exams graded at or above `threshold`, in recorded order.
    pub fn high_grades(&self, threshold: u32) -> Vec<&Exam> {
        self.exams
            .iter()
            .filter(|e| e.grade.is_some_and(|g| g >= threshold))
            .collect()
    }

    pub fn grade_summary(&self) -> GradeSummary {
        GradeSummary {
            graded_exams: self.grades().count(),
            min: self.grades().min(),
            max: self.grades().max(),
            average: self.average_grade(),
        }
    }

    /// Append an exam to the student's record.
    pub fn record_exam(&mut self, exam: Exam) {
        tracing::debug!(
            student = %self.full_name(),
            module = exam.module.as_ref().map(|m| m.code.as_str()).unwrap_or("-"),
            grade = ?exam.grade,
            "exam recorded"
        );
        self.exams.push(exam);
    }
}
