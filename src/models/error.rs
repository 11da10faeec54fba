use thiserror::Error;

/// A field value rejected while constructing a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Expense amount cannot be negative!")]
    NegativeAmount,

    #[error("Note content cannot be empty!")]
    EmptyContent,

    #[error("Age must be positive!")]
    NonPositiveAge,

    #[error("Grade must be between 0 and 100!")]
    GradeOutOfRange,

    #[error("Name cannot be blank!")]
    BlankName,

    #[error("City cannot be blank!")]
    BlankCity,
}
