use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ProviderIdentity, ServerState, run, run_with_listener, spawn_with_listener};

mod analytics;
mod auth;
mod expenses;
mod exports;
mod server;
mod statistics;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{
            DateRange, ExpenseCreated, ExpenseList, ExpenseListResponse, ExpenseNew,
            ExpenseUpdate, ExpenseView, FilterQuery,
        };
    }

    pub mod stats {
        pub use api_types::stats::{StatsRequest, StatsResponse, ViewMode};
    }

    pub mod analytics {
        pub use api_types::analytics::{AnalyticsResponse, YearsResponse};
    }

    pub mod auth {
        pub use api_types::auth::{GateStateResponse, PinSubmit};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Unauthorized,
    Forbidden(String),
    Internal(String),
    Generic(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authorization required".to_string(),
            ),
            ServerError::Forbidden(err) => (StatusCode::FORBIDDEN, err),
            ServerError::Internal(err) => {
                tracing::error!("internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
