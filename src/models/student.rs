use chrono::NaiveDate;

use super::ValidationError;

/// Grades at or above this mark count as a pass.
pub const PASS_MARK: u8 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    name: String,
    age: u32,
    grade: u8,
    city: String,
    admission_date: NaiveDate,
}

impl Student {
    /// Validate and build a student. Name and city are stored trimmed.
    ///
    /// Checks run in the order age, grade, name, city; the first failure wins.
    pub fn new(
        name: impl Into<String>,
        age: i64,
        grade: i64,
        city: impl Into<String>,
        admission_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        if age <= 0 {
            return Err(ValidationError::NonPositiveAge);
        }
        if !(0..=100).contains(&grade) {
            return Err(ValidationError::GradeOutOfRange);
        }
        let name: String = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankName);
        }
        let city: String = city.into();
        let city = city.trim();
        if city.is_empty() {
            return Err(ValidationError::BlankCity);
        }
        let age = u32::try_from(age).map_err(|_| ValidationError::NonPositiveAge)?;
        let grade = u8::try_from(grade).map_err(|_| ValidationError::GradeOutOfRange)?;

        Ok(Self {
            name: name.to_string(),
            age,
            grade,
            city: city.to_string(),
            admission_date: admission_date.unwrap_or_else(super::today),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn grade(&self) -> u8 {
        self.grade
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn admission_date(&self) -> NaiveDate {
        self.admission_date
    }

    pub fn passed(&self) -> bool {
        self.grade >= PASS_MARK
    }

    /// Return a copy with the patch applied. The result goes back through
    /// [`Student::new`], so every field is validated again, not only the
    /// ones the patch touches.
    pub fn apply(&self, patch: &StudentPatch) -> Result<Self, ValidationError> {
        Self::new(
            patch.name.as_deref().unwrap_or(&self.name),
            patch.age.unwrap_or(i64::from(self.age)),
            patch.grade.unwrap_or(i64::from(self.grade)),
            patch.city.as_deref().unwrap_or(&self.city),
            Some(self.admission_date),
        )
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.passed() { "Pass" } else { "Fail" };
        write!(
            f,
            "{:<15} | Age: {:<2} | Grade: {:<3} ({status}) | City: {:<10} | Admission: {}",
            self.name, self.age, self.grade, self.city, self.admission_date
        )
    }
}

/// Partial update for a student. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub grade: Option<i64>,
    pub city: Option<String>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.grade.is_none() && self.city.is_none()
    }
}
