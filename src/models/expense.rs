use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    name: String,
    amount: Decimal,
    category: String,
    date: NaiveDate,
}

impl Expense {
    /// Build an expense, dated today when `date` is `None`.
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount);
        }
        Ok(Self {
            name: name.into(),
            amount,
            category: category.into(),
            date: date.unwrap_or_else(super::today),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl std::fmt::Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {:<10} | {:<15} | ${:.2}",
            self.date, self.category, self.name, self.amount
        )
    }
}
