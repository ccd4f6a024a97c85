//! Keep a student's module list and a module's roster in step.
//!
//! Both sides are denormalized copies: the student holds module codes, the
//! module holds `(student_id, name)` entries. Every operation here updates
//! both and is idempotent.

use tracing::debug;

use crate::models::{EnrolledStudent, Module, Student};

fn roster_position(module: &Module, student: &Student) -> Option<usize> {
    let name = student.full_name();
    module.enrolled.iter().position(|entry| match (&entry.student_id, &student.id) {
        (Some(a), Some(b)) => a == b,
        // Entries whose student record is gone are matched by name.
        _ => entry.name == name,
    })
}

/// Enroll `student` in `module`. Returns `false` if both sides already agreed.
pub fn enroll(student: &mut Student, module: &mut Module) -> bool {
    let mut changed = false;

    if !student.modules.contains(&module.code) {
        student.modules.push(module.code.clone());
        changed = true;
    }
    if roster_position(module, student).is_none() {
        module.enrolled.push(EnrolledStudent {
            student_id: student.id.clone(),
            name: student.full_name(),
        });
        changed = true;
    }

    if changed {
        debug!(student = %student.full_name(), module = %module.code, "enrolled");
    }
    changed
}

/// Remove `student` from `module`. Returns `false` if neither side listed them.
pub fn withdraw(student: &mut Student, module: &mut Module) -> bool {
    let before = student.modules.len();
    student.modules.retain(|code| code != &module.code);
    let mut changed = student.modules.len() != before;

    if let Some(pos) = roster_position(module, student) {
        module.enrolled.remove(pos);
        changed = true;
    }

    if changed {
        debug!(student = %student.full_name(), module = %module.code, "withdrawn");
    }
    changed
}
