//! Expense CRUD endpoints.

use api_types::expense::{
    DateRange as ApiDateRange, ExpenseCreated, ExpenseList, ExpenseListResponse, ExpenseNew,
    ExpenseUpdate, ExpenseView, FilterQuery,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    ServerError,
    server::{ProviderIdentity, ServerState},
};

pub(crate) fn map_category(category: api_types::Category) -> engine::Category {
    match category {
        api_types::Category::FoodAndDining => engine::Category::FoodAndDining,
        api_types::Category::Transportation => engine::Category::Transportation,
        api_types::Category::Shopping => engine::Category::Shopping,
        api_types::Category::Entertainment => engine::Category::Entertainment,
        api_types::Category::FamilySupport => engine::Category::FamilySupport,
        api_types::Category::BillsAndUtilities => engine::Category::BillsAndUtilities,
        api_types::Category::Healthcare => engine::Category::Healthcare,
        api_types::Category::Education => engine::Category::Education,
        api_types::Category::Travel => engine::Category::Travel,
        api_types::Category::Other => engine::Category::Other,
    }
}

fn map_category_view(category: engine::Category) -> api_types::Category {
    match category {
        engine::Category::FoodAndDining => api_types::Category::FoodAndDining,
        engine::Category::Transportation => api_types::Category::Transportation,
        engine::Category::Shopping => api_types::Category::Shopping,
        engine::Category::Entertainment => api_types::Category::Entertainment,
        engine::Category::FamilySupport => api_types::Category::FamilySupport,
        engine::Category::BillsAndUtilities => api_types::Category::BillsAndUtilities,
        engine::Category::Healthcare => api_types::Category::Healthcare,
        engine::Category::Education => api_types::Category::Education,
        engine::Category::Travel => api_types::Category::Travel,
        engine::Category::Other => api_types::Category::Other,
    }
}

fn map_payment_method(method: api_types::PaymentMethod) -> engine::PaymentMethod {
    match method {
        api_types::PaymentMethod::Upi => engine::PaymentMethod::Upi,
        api_types::PaymentMethod::Card => engine::PaymentMethod::Card,
        api_types::PaymentMethod::Cash => engine::PaymentMethod::Cash,
        api_types::PaymentMethod::Bank => engine::PaymentMethod::Bank,
    }
}

fn map_payment_method_view(method: engine::PaymentMethod) -> api_types::PaymentMethod {
    match method {
        engine::PaymentMethod::Upi => api_types::PaymentMethod::Upi,
        engine::PaymentMethod::Card => api_types::PaymentMethod::Card,
        engine::PaymentMethod::Cash => api_types::PaymentMethod::Cash,
        engine::PaymentMethod::Bank => api_types::PaymentMethod::Bank,
    }
}

/// Builds the engine-side filter from the wire criteria.
pub(crate) fn engine_filter(query: FilterQuery) -> engine::ExpenseFilter {
    engine::ExpenseFilter {
        category: query.category.map(map_category),
        search: query.search,
        date_range: match query.date_range {
            ApiDateRange::All => engine::DateRange::All,
            ApiDateRange::Week => engine::DateRange::Week,
            ApiDateRange::Month => engine::DateRange::Month,
            ApiDateRange::Year => engine::DateRange::Year,
        },
        min_amount_minor: query.min_amount_minor,
        max_amount_minor: query.max_amount_minor,
    }
}

pub(crate) fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        amount_minor: expense.amount_minor,
        description: expense.description,
        category: map_category_view(expense.category),
        date: expense.date,
        payment_method: map_payment_method_view(expense.payment_method),
    }
}

fn new_fields(payload: ExpenseNew) -> engine::ExpenseFields {
    engine::ExpenseFields {
        amount_minor: payload.amount_minor,
        description: payload.description,
        category: map_category(payload.category),
        date: payload.date,
        payment_method: map_payment_method(payload.payment_method),
    }
}

fn update_fields(payload: ExpenseUpdate) -> engine::ExpenseFields {
    engine::ExpenseFields {
        amount_minor: payload.amount_minor,
        description: payload.description,
        category: map_category(payload.category),
        date: payload.date,
        payment_method: map_payment_method(payload.payment_method),
    }
}

/// Lists the owner's expenses after the filter stage, store order preserved.
pub async fn list(
    Extension(identity): Extension<ProviderIdentity>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseList>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let today = Utc::now().date_naive();
    let expenses = state.engine.list_expenses(&identity.user_id).await?;
    let filtered = engine_filter(payload.filter).apply(expenses, today);

    Ok(Json(ExpenseListResponse {
        expenses: filtered.into_iter().map(map_expense).collect(),
    }))
}

pub async fn create(
    Extension(identity): Extension<ProviderIdentity>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ServerError> {
    let id = state
        .engine
        .create_expense(&identity.user_id, new_fields(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(ExpenseCreated { id })))
}

pub async fn update(
    Extension(identity): Extension<ProviderIdentity>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_expense(&identity.user_id, id, update_fields(payload))
        .await?;

    Ok(StatusCode::OK)
}

pub async fn remove(
    Extension(identity): Extension<ProviderIdentity>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(&identity.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
