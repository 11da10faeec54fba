mod error;
mod expense;
mod note;
mod student;

pub use error::ValidationError;
pub use expense::Expense;
pub use note::Note;
pub use student::{Student, StudentPatch};

/// Default date for records created without one.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
