//! Aggregation stage: scalar and series aggregates over narrowed expenses.
//!
//! Every function here is pure and total: empty input degrades to zero or
//! empty output, never to an error. Two different record sets flow in:
//! `current` is the period-narrowed sequence and `filtered` the broader
//! filtered one. `monthly_data` deliberately sums over `filtered` while the
//! other series sum over `current`; the asymmetry is part of the contract.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Expense, Period, ViewMode, period};

/// One month of the Jan..Dec series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    pub amount_minor: i64,
}

/// One calendar day of the selected month; `date` is the zero-padded
/// two-digit day label ("01".."31").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: String,
    pub amount_minor: i64,
}

/// A labeled sum (category or payment method breakdown).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedBucket {
    pub name: String,
    pub value_minor: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingDay {
    pub date: NaiveDate,
    pub amount_minor: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Neutral,
}

/// Month-over-month change of the wall-clock current month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrend {
    pub trend: Trend,
    /// Absolute relative change, in percent.
    pub percentage: f64,
}

/// Analytics-view averages for the selected period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodAverages {
    pub daily_minor: f64,
    pub weekly_minor: f64,
}

/// Sum of all amounts; 0 when empty.
pub fn total_minor(current: &[Expense]) -> i64 {
    current.iter().map(|expense| expense.amount_minor).sum()
}

/// Mean amount; 0 when empty.
pub fn average_minor(current: &[Expense]) -> f64 {
    if current.is_empty() {
        return 0.0;
    }
    total_minor(current) as f64 / current.len() as f64
}

/// Headline per-day figure for the dashboard.
///
/// Monthly mode divides by the number of days in the selected month. Yearly
/// mode divides by 12, so the "daily" figure is really the mean of the
/// twelve month buckets.
pub fn daily_average_minor(current: &[Expense], period: &Period) -> f64 {
    let total = total_minor(current) as f64;
    match period.view_mode {
        ViewMode::Monthly => {
            let days = period.days_in_month();
            if days == 0 {
                return 0.0;
            }
            total / f64::from(days)
        }
        ViewMode::Yearly => total / 12.0,
    }
}

/// Twelve Jan..Dec buckets for the selected year, summed over the broader
/// filtered set (not the period-narrowed one).
pub fn monthly_data(filtered: &[Expense], year: i32) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = (0..12)
        .map(|month0| MonthBucket {
            month: period::short_month_name(month0).to_string(),
            amount_minor: 0,
        })
        .collect();

    for expense in filtered {
        if expense.date.year() == year {
            buckets[expense.date.month0() as usize].amount_minor += expense.amount_minor;
        }
    }
    buckets
}

/// One bucket per calendar day of the selected month, summed over `current`.
pub fn trend_data(current: &[Expense], month0: u32, year: i32) -> Vec<DayBucket> {
    let days = period::days_in_month(year, month0);
    let mut buckets: Vec<DayBucket> = (1..=days)
        .map(|day| DayBucket {
            date: format!("{day:02}"),
            amount_minor: 0,
        })
        .collect();

    for expense in current {
        if expense.date.month0() == month0 && expense.date.year() == year {
            buckets[expense.date.day0() as usize].amount_minor += expense.amount_minor;
        }
    }
    buckets
}

/// Per-category sums over `current`, in first-encounter order.
pub fn category_data(current: &[Expense]) -> Vec<NamedBucket> {
    let mut buckets: Vec<NamedBucket> = Vec::new();
    for expense in current {
        let name = expense.category.as_str();
        match buckets.iter_mut().find(|bucket| bucket.name == name) {
            Some(bucket) => bucket.value_minor += expense.amount_minor,
            None => buckets.push(NamedBucket {
                name: name.to_string(),
                value_minor: expense.amount_minor,
            }),
        }
    }
    buckets
}

/// Per-payment-method sums over `current`, display-labeled, in
/// first-encounter order.
pub fn payment_method_data(current: &[Expense]) -> Vec<NamedBucket> {
    let mut buckets: Vec<NamedBucket> = Vec::new();
    for expense in current {
        let name = expense.payment_method.label();
        match buckets.iter_mut().find(|bucket| bucket.name == name) {
            Some(bucket) => bucket.value_minor += expense.amount_minor,
            None => buckets.push(NamedBucket {
                name: name.to_string(),
                value_minor: expense.amount_minor,
            }),
        }
    }
    buckets
}

/// The five highest-spending dates of the period, descending by sum.
/// Ties break on the more recent date.
pub fn top_spending_days(current: &[Expense]) -> Vec<SpendingDay> {
    let mut by_date: HashMap<NaiveDate, i64> = HashMap::new();
    for expense in current {
        *by_date.entry(expense.date).or_insert(0) += expense.amount_minor;
    }

    let mut days: Vec<SpendingDay> = by_date
        .into_iter()
        .map(|(date, amount_minor)| SpendingDay { date, amount_minor })
        .collect();
    days.sort_by(|a, b| {
        b.amount_minor
            .cmp(&a.amount_minor)
            .then_with(|| b.date.cmp(&a.date))
    });
    days.truncate(5);
    days
}

/// Compares the wall-clock current month's bucket against the preceding one.
///
/// Neutral when there is no preceding bucket (January), the preceding bucket
/// is 0, or the change is exactly 0.
pub fn spending_trend(monthly: &[MonthBucket], today: NaiveDate) -> SpendingTrend {
    let current_month0 = today.month0() as usize;
    let current = monthly
        .get(current_month0)
        .map_or(0, |bucket| bucket.amount_minor);
    let previous = match current_month0.checked_sub(1) {
        Some(index) => monthly.get(index).map_or(0, |bucket| bucket.amount_minor),
        None => 0,
    };

    if previous == 0 {
        return SpendingTrend::default();
    }

    let percentage = (current - previous) as f64 / previous as f64 * 100.0;
    let trend = if percentage > 0.0 {
        Trend::Up
    } else if percentage < 0.0 {
        Trend::Down
    } else {
        Trend::Neutral
    };
    SpendingTrend {
        trend,
        percentage: percentage.abs(),
    }
}

/// Distinct years across ALL of an owner's expenses, newest first;
/// `[today.year()]` when there are none.
pub fn available_years(all: &[Expense], today: NaiveDate) -> Vec<i32> {
    if all.is_empty() {
        return vec![today.year()];
    }
    let mut years: Vec<i32> = all.iter().map(|expense| expense.date.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Daily/weekly averages as the analytics view computes them: monthly mode
/// divides by the days of the month, yearly mode by 365 (unlike
/// [`daily_average_minor`], which divides by 12 there).
pub fn period_averages(current: &[Expense], period: &Period) -> PeriodAverages {
    if current.is_empty() {
        return PeriodAverages::default();
    }
    let total = total_minor(current) as f64;
    let daily = match period.view_mode {
        ViewMode::Monthly => {
            let days = period.days_in_month();
            if days == 0 {
                return PeriodAverages::default();
            }
            total / f64::from(days)
        }
        ViewMode::Yearly => total / 365.0,
    };
    PeriodAverages {
        daily_minor: daily,
        weekly_minor: daily * 7.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, ExpenseFields, ExpenseFilter, PaymentMethod};

    fn expense(amount_minor: i64, date: &str, category: Category) -> Expense {
        Expense::new(
            "alice".to_string(),
            ExpenseFields {
                amount_minor,
                description: "x".to_string(),
                category,
                date: date.parse().unwrap(),
                payment_method: PaymentMethod::Upi,
            },
        )
        .unwrap()
    }

    fn march_records() -> Vec<Expense> {
        vec![
            expense(100, "2024-03-05", Category::FoodAndDining),
            expense(50, "2024-03-05", Category::FoodAndDining),
            expense(30, "2024-04-01", Category::Travel),
        ]
    }

    #[test]
    fn monthly_scenario_march_2024() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let filtered = ExpenseFilter::default().apply(march_records(), today);
        let period = Period::monthly(2, 2024);
        let current = period.select(&filtered);

        assert_eq!(total_minor(&current), 150);
        assert_eq!(average_minor(&current), 75.0);

        let categories = category_data(&current);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Food & Dining");
        assert_eq!(categories[0].value_minor, 150);

        let trend = trend_data(&current, 2, 2024);
        assert_eq!(trend.len(), 31);
        assert_eq!(trend[4].date, "05");
        assert_eq!(trend[4].amount_minor, 150);
        assert!(
            trend
                .iter()
                .enumerate()
                .all(|(i, bucket)| i == 4 || bucket.amount_minor == 0)
        );
    }

    #[test]
    fn yearly_scenario_2024() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let filtered = ExpenseFilter::default().apply(march_records(), today);
        let period = Period::yearly(2024);
        let current = period.select(&filtered);

        assert_eq!(total_minor(&current), 180);

        let monthly = monthly_data(&filtered, 2024);
        assert_eq!(monthly.len(), 12);
        assert_eq!(monthly[2].month, "Mar");
        assert_eq!(monthly[2].amount_minor, 150);
        assert_eq!(monthly[3].amount_minor, 30);
        assert!(
            monthly
                .iter()
                .enumerate()
                .all(|(i, bucket)| i == 2 || i == 3 || bucket.amount_minor == 0)
        );
    }

    #[test]
    fn monthly_data_always_has_twelve_labeled_buckets() {
        let monthly = monthly_data(&[], 2024);
        let labels: Vec<&str> = monthly.iter().map(|b| b.month.as_str()).collect();
        assert_eq!(
            labels,
            ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
    }

    #[test]
    fn monthly_data_ignores_period_narrowing() {
        // Records from two years; the series only buckets the asked year,
        // but it is fed the broader filtered set by contract.
        let filtered = vec![
            expense(100, "2024-03-05", Category::Other),
            expense(70, "2023-03-05", Category::Other),
        ];
        let monthly = monthly_data(&filtered, 2024);
        assert_eq!(monthly[2].amount_minor, 100);
    }

    #[test]
    fn trend_data_length_follows_the_month() {
        assert_eq!(trend_data(&[], 1, 2024).len(), 29);
        assert_eq!(trend_data(&[], 1, 2023).len(), 28);
        assert_eq!(trend_data(&[], 3, 2024).len(), 30);
    }

    #[test]
    fn category_sums_equal_the_total() {
        let current = vec![
            expense(120, "2024-03-01", Category::FoodAndDining),
            expense(80, "2024-03-02", Category::Travel),
            expense(40, "2024-03-03", Category::FoodAndDining),
        ];
        let categories = category_data(&current);
        let sum: i64 = categories.iter().map(|b| b.value_minor).sum();
        assert_eq!(sum, total_minor(&current));
        // First-encounter order.
        assert_eq!(categories[0].name, "Food & Dining");
        assert_eq!(categories[1].name, "Travel");
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average_minor(&[]), 0.0);
        assert_eq!(total_minor(&[]), 0);
    }

    #[test]
    fn daily_average_divides_by_twelve_in_yearly_mode() {
        let current = vec![expense(1200, "2024-03-05", Category::Other)];
        assert_eq!(daily_average_minor(&current, &Period::yearly(2024)), 100.0);

        let monthly = Period::monthly(2, 2024);
        assert_eq!(daily_average_minor(&current, &monthly), 1200.0 / 31.0);
    }

    #[test]
    fn period_averages_divide_by_365_in_yearly_mode() {
        let current = vec![expense(3650, "2024-03-05", Category::Other)];
        let averages = period_averages(&current, &Period::yearly(2024));
        assert_eq!(averages.daily_minor, 10.0);
        assert_eq!(averages.weekly_minor, 70.0);

        assert_eq!(period_averages(&[], &Period::yearly(2024)), PeriodAverages::default());
    }

    #[test]
    fn payment_methods_are_display_labeled() {
        let mut current = vec![expense(100, "2024-03-05", Category::Other)];
        current[0].payment_method = PaymentMethod::Upi;
        let methods = payment_method_data(&current);
        assert_eq!(methods[0].name, "Upi");
        assert_eq!(methods[0].value_minor, 100);
    }

    #[test]
    fn top_spending_days_takes_five_descending() {
        let current = vec![
            expense(10, "2024-03-01", Category::Other),
            expense(60, "2024-03-02", Category::Other),
            expense(30, "2024-03-03", Category::Other),
            expense(50, "2024-03-04", Category::Other),
            expense(20, "2024-03-05", Category::Other),
            expense(40, "2024-03-06", Category::Other),
            // Same date as the first record; sums to 70, the new maximum.
            expense(60, "2024-03-01", Category::Other),
        ];
        let days = top_spending_days(&current);
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date.to_string(), "2024-03-01");
        assert_eq!(days[0].amount_minor, 70);
        assert!(days.windows(2).all(|w| w[0].amount_minor >= w[1].amount_minor));
    }

    #[test]
    fn spending_trend_compares_against_the_previous_month() {
        let mut monthly = monthly_data(&[], 2024);
        monthly[2].amount_minor = 100;
        monthly[3].amount_minor = 150;

        // April vs March: up 50%.
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let trend = spending_trend(&monthly, today);
        assert_eq!(trend.trend, Trend::Up);
        assert_eq!(trend.percentage, 50.0);

        // May vs April: down 100%.
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let trend = spending_trend(&monthly, today);
        assert_eq!(trend.trend, Trend::Down);
        assert_eq!(trend.percentage, 100.0);

        // March vs February (empty): neutral.
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(spending_trend(&monthly, today), SpendingTrend::default());

        // January has no preceding bucket: neutral.
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(spending_trend(&monthly, today), SpendingTrend::default());
    }

    #[test]
    fn available_years_is_distinct_and_descending() {
        let all = vec![
            expense(10, "2022-01-01", Category::Other),
            expense(10, "2024-06-01", Category::Other),
            expense(10, "2022-12-31", Category::Other),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(available_years(&all, today), vec![2024, 2022]);
        assert_eq!(available_years(&[], today), vec![2026]);
    }
}
