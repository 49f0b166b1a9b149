//! CSV export endpoint.

use api_types::expense::ExpenseList;
use axum::{Extension, Json, extract::State, http::header, response::IntoResponse};
use chrono::Utc;
use csv::{QuoteStyle, WriterBuilder};
use engine::MoneyPaise;

use crate::{
    ServerError,
    expenses::engine_filter,
    server::{ProviderIdentity, ServerState},
};

const CSV_HEADER: [&str; 5] = ["Date", "Description", "Category", "Amount", "Payment Method"];

/// Streams the currently filtered expenses as a CSV attachment.
///
/// Fields are written unquoted: a comma inside a description shifts columns
/// in the produced file.
pub async fn export_csv(
    Extension(identity): Extension<ProviderIdentity>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseList>,
) -> Result<impl IntoResponse, ServerError> {
    let today = Utc::now().date_naive();
    let expenses = state.engine.list_expenses(&identity.user_id).await?;
    let filtered = engine_filter(payload.filter).apply(expenses, today);

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(vec![]);
    writer
        .write_record(CSV_HEADER)
        .map_err(|err| ServerError::Internal(format!("failed to write export header: {err}")))?;
    for expense in &filtered {
        writer
            .write_record([
                expense.date.to_string(),
                expense.description.clone(),
                expense.category.as_str().to_string(),
                MoneyPaise::new(expense.amount_minor).to_decimal_string(),
                expense.payment_method.as_str().to_string(),
            ])
            .map_err(|err| {
                ServerError::Internal(format!("failed to serialize export row: {err}"))
            })?;
    }
    let data = writer
        .into_inner()
        .map_err(|err| ServerError::Internal(format!("failed to finalize export: {err}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        data,
    ))
}
