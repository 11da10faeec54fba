use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{RecordStore, StoreError};
use crate::models::Expense;

/// Spending for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub count: usize,
    pub total: Decimal,
    /// Per-category totals, alphabetical by category.
    pub by_category: Vec<(String, Decimal)>,
}

impl RecordStore<Expense> {
    /// `Ok(None)` when no expense falls in the month. Fails instead of
    /// wrapping when the month's total does not fit in a `Decimal`.
    pub fn monthly_summary(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Option<MonthlySummary>, StoreError> {
        let expenses = self.in_month(year, month);
        if expenses.is_empty() {
            return Ok(None);
        }

        let overflow = || StoreError::TotalOverflow { year, month };
        let mut total = Decimal::ZERO;
        let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
        for exp in &expenses {
            total = total.checked_add(exp.amount()).ok_or_else(overflow)?;
            let slot = by_category.entry(exp.category()).or_insert(Decimal::ZERO);
            *slot = slot.checked_add(exp.amount()).ok_or_else(overflow)?;
        }

        Ok(Some(MonthlySummary {
            year,
            month,
            count: expenses.len(),
            total,
            by_category: by_category
                .into_iter()
                .map(|(name, amount)| (name.to_string(), amount))
                .collect(),
        }))
    }
}
