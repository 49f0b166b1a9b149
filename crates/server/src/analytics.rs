//! Analytics API endpoints

use api_types::analytics::{AnalyticsResponse, SpendingDayView, SpendingTrendView, YearsResponse};
use api_types::stats::StatsRequest;
use axum::{Extension, Json, extract::State};
use chrono::Utc;
use engine::{ViewMode, aggregate};

use crate::{
    ServerError,
    expenses::engine_filter,
    server::{ProviderIdentity, ServerState},
    statistics::{map_named, resolve_period},
};

fn map_trend(trend: aggregate::SpendingTrend) -> SpendingTrendView {
    SpendingTrendView {
        trend: match trend.trend {
            aggregate::Trend::Up => "up",
            aggregate::Trend::Down => "down",
            aggregate::Trend::Neutral => "neutral",
        }
        .to_string(),
        percentage: trend.percentage,
    }
}

/// Handle requests for the analytics view aggregates.
pub async fn get_analytics(
    Extension(identity): Extension<ProviderIdentity>,
    State(state): State<ServerState>,
    Json(payload): Json<StatsRequest>,
) -> Result<Json<AnalyticsResponse>, ServerError> {
    let today = Utc::now().date_naive();
    let period = resolve_period(&payload, today);

    let expenses = state.engine.list_expenses(&identity.user_id).await?;
    let filtered = engine_filter(payload.filter).apply(expenses, today);
    let current = period.select(&filtered);

    // Month-over-month comparison only exists in yearly mode.
    let spending_trend = match period.view_mode {
        ViewMode::Yearly => {
            aggregate::spending_trend(&aggregate::monthly_data(&filtered, period.year), today)
        }
        ViewMode::Monthly => aggregate::SpendingTrend::default(),
    };
    let averages = aggregate::period_averages(&current, &period);

    Ok(Json(AnalyticsResponse {
        payment_methods: aggregate::payment_method_data(&current)
            .into_iter()
            .map(map_named)
            .collect(),
        top_spending_days: aggregate::top_spending_days(&current)
            .into_iter()
            .map(|day| SpendingDayView {
                date: day.date,
                amount_minor: day.amount_minor,
            })
            .collect(),
        spending_trend: map_trend(spending_trend),
        daily_average_minor: averages.daily_minor,
        weekly_average_minor: averages.weekly_minor,
        transaction_count: current.len(),
    }))
}

/// Years selectable in the period picker.
pub async fn get_years(
    Extension(identity): Extension<ProviderIdentity>,
    State(state): State<ServerState>,
) -> Result<Json<YearsResponse>, ServerError> {
    let today = Utc::now().date_naive();
    let years = state
        .engine
        .available_years(&identity.user_id, today)
        .await?;

    Ok(Json(YearsResponse { years }))
}
