//! Authorization gate endpoints.
//!
//! The external provider verifies identity; these endpoints drive the local
//! gate (allow-list + PIN) layered on top of it.

use api_types::auth::{GateStateResponse, PinSubmit};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::TypedHeader;
use engine::GateState;

use crate::{
    ServerError,
    server::{ServerState, UserEmailHeader, UserIdHeader},
};

fn state_response(state: GateState) -> Json<GateStateResponse> {
    Json(GateStateResponse {
        state: state.as_str().to_string(),
    })
}

/// Records a provider sign-in and runs the allow-list check.
pub async fn provider_session(
    TypedHeader(user_id): TypedHeader<UserIdHeader>,
    TypedHeader(email): TypedHeader<UserEmailHeader>,
    State(state): State<ServerState>,
) -> Result<Json<GateStateResponse>, ServerError> {
    let mut gate = state.gate.lock().await;
    match gate.provider_sign_in(&user_id.0, &email.0) {
        GateState::Denied => Err(ServerError::Forbidden(
            "access denied: this account is not authorized to use this application".to_string(),
        )),
        other => Ok(state_response(other)),
    }
}

/// Checks the submitted PIN. A wrong PIN clears the session, so the
/// provider step has to be repeated.
pub async fn submit_pin(
    TypedHeader(user_id): TypedHeader<UserIdHeader>,
    TypedHeader(email): TypedHeader<UserEmailHeader>,
    State(state): State<ServerState>,
    Json(payload): Json<PinSubmit>,
) -> Result<Json<GateStateResponse>, ServerError> {
    let mut gate = state.gate.lock().await;
    match gate.submit_pin(&user_id.0, &email.0, &payload.pin) {
        GateState::Authorized => Ok(state_response(GateState::Authorized)),
        GateState::Denied => Err(ServerError::Forbidden(
            "incorrect PIN, sign in again".to_string(),
        )),
        _ => Err(ServerError::Unauthorized),
    }
}

pub async fn sign_out(
    TypedHeader(user_id): TypedHeader<UserIdHeader>,
    State(state): State<ServerState>,
) -> StatusCode {
    state.gate.lock().await.sign_out(&user_id.0);
    StatusCode::OK
}

pub async fn gate_state(
    TypedHeader(user_id): TypedHeader<UserIdHeader>,
    TypedHeader(email): TypedHeader<UserEmailHeader>,
    State(state): State<ServerState>,
) -> Json<GateStateResponse> {
    let mut gate = state.gate.lock().await;
    state_response(gate.state(&user_id.0, &email.0))
}
