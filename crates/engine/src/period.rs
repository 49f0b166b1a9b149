//! Period selection stage: narrow a filtered sequence to one month or year.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Expense;

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Monthly,
    Yearly,
}

/// The selected aggregation window: one month of a year, or a whole year.
///
/// Months are zero-based (0 = January) throughout the engine and the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub view_mode: ViewMode,
    /// Ignored in yearly mode.
    pub month0: u32,
    pub year: i32,
}

impl Period {
    pub fn monthly(month0: u32, year: i32) -> Self {
        Self {
            view_mode: ViewMode::Monthly,
            month0,
            year,
        }
    }

    pub fn yearly(year: i32) -> Self {
        Self {
            view_mode: ViewMode::Yearly,
            month0: 0,
            year,
        }
    }

    /// The current calendar month, the default selection.
    pub fn current(today: NaiveDate) -> Self {
        Self::monthly(today.month0(), today.year())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.view_mode {
            ViewMode::Monthly => date.month0() == self.month0 && date.year() == self.year,
            ViewMode::Yearly => date.year() == self.year,
        }
    }

    /// Pure narrowing of an already-filtered sequence; order preserved.
    pub fn select(&self, filtered: &[Expense]) -> Vec<Expense> {
        filtered
            .iter()
            .filter(|expense| self.contains(expense.date))
            .cloned()
            .collect()
    }

    /// Number of days in the selected month (28-31).
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month0)
    }
}

/// Number of days in a month: the distance between its first day and the
/// first day of the next month. Returns 0 for an out-of-range `month0`.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1);
    let next = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// Three-letter month name for a zero-based index ("Jan".."Dec").
pub fn short_month_name(month0: u32) -> &'static str {
    SHORT_MONTHS.get(month0 as usize).copied().unwrap_or("")
}
