//! Statistics API endpoints

use api_types::stats::{
    DayBucket as ApiDayBucket, MonthBucket as ApiMonthBucket, NamedBucket as ApiNamedBucket,
    StatsRequest, StatsResponse, ViewMode as ApiViewMode,
};
use axum::{Extension, Json, extract::State};
use chrono::{Datelike, NaiveDate, Utc};
use engine::{Period, ViewMode, aggregate};

use crate::{
    ServerError,
    expenses::engine_filter,
    server::{ProviderIdentity, ServerState},
};

/// Resolves the requested period, defaulting to the current month and year.
pub(crate) fn resolve_period(payload: &StatsRequest, today: NaiveDate) -> Period {
    let month0 = payload.month0.unwrap_or_else(|| today.month0());
    let year = payload.year.unwrap_or_else(|| today.year());
    match payload.view_mode {
        ApiViewMode::Monthly => Period::monthly(month0, year),
        ApiViewMode::Yearly => Period::yearly(year),
    }
}

fn map_month(bucket: aggregate::MonthBucket) -> ApiMonthBucket {
    ApiMonthBucket {
        month: bucket.month,
        amount_minor: bucket.amount_minor,
    }
}

fn map_day(bucket: aggregate::DayBucket) -> ApiDayBucket {
    ApiDayBucket {
        date: bucket.date,
        amount_minor: bucket.amount_minor,
    }
}

pub(crate) fn map_named(bucket: aggregate::NamedBucket) -> ApiNamedBucket {
    ApiNamedBucket {
        name: bucket.name,
        value_minor: bucket.value_minor,
    }
}

/// Handle requests for the dashboard aggregates.
pub async fn get_stats(
    Extension(identity): Extension<ProviderIdentity>,
    State(state): State<ServerState>,
    Json(payload): Json<StatsRequest>,
) -> Result<Json<StatsResponse>, ServerError> {
    let today = Utc::now().date_naive();
    let period = resolve_period(&payload, today);

    let expenses = state.engine.list_expenses(&identity.user_id).await?;
    let filtered = engine_filter(payload.filter).apply(expenses, today);
    let current = period.select(&filtered);

    // The monthly series sums the broader filtered set; the daily trend
    // sums the period-narrowed one.
    let (monthly, trend) = match period.view_mode {
        ViewMode::Yearly => (
            Some(
                aggregate::monthly_data(&filtered, period.year)
                    .into_iter()
                    .map(map_month)
                    .collect(),
            ),
            None,
        ),
        ViewMode::Monthly => (
            None,
            Some(
                aggregate::trend_data(&current, period.month0, period.year)
                    .into_iter()
                    .map(map_day)
                    .collect(),
            ),
        ),
    };

    Ok(Json(StatsResponse {
        total_minor: aggregate::total_minor(&current),
        average_minor: aggregate::average_minor(&current),
        daily_average_minor: aggregate::daily_average_minor(&current, &period),
        monthly,
        trend,
        categories: aggregate::category_data(&current)
            .into_iter()
            .map(map_named)
            .collect(),
        transaction_count: current.len(),
    }))
}
