use rust_decimal::Decimal;

use super::{tally, RecordStore, StoreError};
use crate::models::{Student, StudentPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentAnalysis {
    /// Rounded to two decimal places.
    pub average_age: Decimal,
    /// Rounded to two decimal places.
    pub average_grade: Decimal,
    /// Students per city, most common first.
    pub by_city: Vec<(String, usize)>,
    pub passed: usize,
    pub failed: usize,
}

impl RecordStore<Student> {
    /// Apply `patch` to the student at `id` and persist.
    ///
    /// The patched student is validated as a whole; any invalid field
    /// rejects the update and leaves both memory and file untouched.
    pub fn update(&mut self, id: usize, patch: &StudentPatch) -> Result<&Student, StoreError> {
        let updated = self.get(id)?.apply(patch)?;
        self.replace(id, updated)?;
        self.get(id)
    }

    pub fn analyze(&self) -> Option<StudentAnalysis> {
        let students = self.records();
        if students.is_empty() {
            return None;
        }
        let n = Decimal::from(students.len());
        let age_sum: u64 = students.iter().map(|s| u64::from(s.age())).sum();
        let grade_sum: u64 = students.iter().map(|s| u64::from(s.grade())).sum();
        let passed = students.iter().filter(|s| s.passed()).count();

        Some(StudentAnalysis {
            average_age: (Decimal::from(age_sum) / n).round_dp(2),
            average_grade: (Decimal::from(grade_sum) / n).round_dp(2),
            by_city: tally(students.iter().map(|s| s.city())),
            passed,
            failed: students.len() - passed,
        })
    }
}
