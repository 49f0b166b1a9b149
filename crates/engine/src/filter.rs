//! Filter stage: user-chosen predicates over the full expense set.
//!
//! Every active predicate must pass (logical AND). The output preserves the
//! input order and never duplicates records.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Category, Expense};

/// Rolling date window, anchored at `today`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl DateRange {
    /// Inclusive lower bound of the window; `None` is unbounded.
    ///
    /// There is no upper bound: future-dated expenses always pass.
    fn lower_bound(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::Week => today.checked_sub_days(Days::new(7)),
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::Year => today.checked_sub_months(Months::new(12)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    /// Case-insensitive substring match against the description.
    pub search: Option<String>,
    pub date_range: DateRange,
    pub min_amount_minor: Option<i64>,
    pub max_amount_minor: Option<i64>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        if let Some(category) = self.category
            && expense.category != category
        {
            return false;
        }

        if let Some(term) = &self.search
            && !term.is_empty()
            && !expense
                .description
                .to_lowercase()
                .contains(&term.to_lowercase())
        {
            return false;
        }

        if let Some(bound) = self.date_range.lower_bound(today)
            && expense.date < bound
        {
            return false;
        }

        if let Some(min) = self.min_amount_minor
            && expense.amount_minor < min
        {
            return false;
        }

        if let Some(max) = self.max_amount_minor
            && expense.amount_minor > max
        {
            return false;
        }

        true
    }

    /// Keeps the expenses satisfying every active predicate, in order.
    pub fn apply(&self, expenses: Vec<Expense>, today: NaiveDate) -> Vec<Expense> {
        expenses
            .into_iter()
            .filter(|expense| self.matches(expense, today))
            .collect()
    }
}
