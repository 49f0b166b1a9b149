use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expense category, serialized as its display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Family support")]
    FamilySupport,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Other")]
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Card,
    Cash,
    Bank,
}

pub mod expense {
    use super::*;

    /// Rolling date window for list filtering, anchored at the server's
    /// current date.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum DateRange {
        #[default]
        All,
        Week,
        Month,
        Year,
    }

    /// Filter criteria; absent fields are inactive.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct FilterQuery {
        pub category: Option<Category>,
        /// Case-insensitive substring match against the description.
        pub search: Option<String>,
        #[serde(default)]
        pub date_range: DateRange,
        pub min_amount_minor: Option<i64>,
        pub max_amount_minor: Option<i64>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseList {
        #[serde(default)]
        pub filter: FilterQuery,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub description: String,
        pub category: Category,
        pub date: NaiveDate,
        pub payment_method: PaymentMethod,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }

    /// All fields are required on create; the store assigns the id.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub amount_minor: i64,
        pub description: String,
        pub category: Category,
        pub date: NaiveDate,
        pub payment_method: PaymentMethod,
    }

    /// Full replacement of an owned expense's fields.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub amount_minor: i64,
        pub description: String,
        pub category: Category,
        pub date: NaiveDate,
        pub payment_method: PaymentMethod,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: Uuid,
    }
}

pub mod stats {
    use super::*;
    use crate::expense::FilterQuery;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ViewMode {
        #[default]
        Monthly,
        Yearly,
    }

    /// Filter criteria plus the selected period.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct StatsRequest {
        #[serde(default)]
        pub filter: FilterQuery,
        #[serde(default)]
        pub view_mode: ViewMode,
        /// Zero-based month index (0 = January). Defaults to the current
        /// month; ignored in yearly mode.
        pub month0: Option<u32>,
        /// Defaults to the current year.
        pub year: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthBucket {
        pub month: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DayBucket {
        /// Zero-padded two-digit day label ("01".."31").
        pub date: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct NamedBucket {
        pub name: String,
        pub value_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatsResponse {
        pub total_minor: i64,
        pub average_minor: f64,
        /// Monthly mode: total over the days of the month. Yearly mode:
        /// total over 12.
        pub daily_average_minor: f64,
        /// Yearly mode only: exactly 12 Jan..Dec buckets.
        pub monthly: Option<Vec<MonthBucket>>,
        /// Monthly mode only: one bucket per calendar day.
        pub trend: Option<Vec<DayBucket>>,
        pub categories: Vec<NamedBucket>,
        pub transaction_count: usize,
    }
}

pub mod analytics {
    use super::*;
    use crate::stats::NamedBucket;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SpendingDayView {
        pub date: NaiveDate,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SpendingTrendView {
        /// One of `up`, `down`, `neutral`.
        pub trend: String,
        /// Absolute month-over-month change, in percent.
        pub percentage: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AnalyticsResponse {
        pub payment_methods: Vec<NamedBucket>,
        /// At most five dates, descending by spend.
        pub top_spending_days: Vec<SpendingDayView>,
        pub spending_trend: SpendingTrendView,
        pub daily_average_minor: f64,
        pub weekly_average_minor: f64,
        pub transaction_count: usize,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct YearsResponse {
        pub years: Vec<i32>,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PinSubmit {
        pub pin: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GateStateResponse {
        /// One of `unauthenticated`, `pin_pending`, `authorized`, `denied`.
        pub state: String,
    }
}
