use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{analytics, auth, expenses, exports, statistics};
use engine::{Engine, Gate};

static USER_ID_HEADER: axum::http::HeaderName = axum::http::HeaderName::from_static("x-user-id");
static USER_EMAIL_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-user-email");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub gate: Arc<Mutex<Gate>>,
}

impl ServerState {
    pub fn new(engine: Engine, gate: Gate) -> Self {
        Self {
            engine: Arc::new(engine),
            gate: Arc::new(Mutex::new(gate)),
        }
    }
}

/// Identity asserted by the external auth provider fronting the service.
///
/// The gate middleware inserts it into request extensions once the session
/// is authorized; handlers never look at the raw headers.
#[derive(Clone, Debug)]
pub struct ProviderIdentity {
    pub user_id: String,
    pub email: String,
}

/// `TypedHeader` for the provider-verified user id.
///
/// Requests must contain an "x-user-id" entry in the header.
#[derive(Debug)]
pub struct UserIdHeader(pub String);

impl Header for UserIdHeader {
    fn name() -> &'static axum::http::HeaderName {
        &USER_ID_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(UserIdHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-user-id header"),
        }
    }
}

/// `TypedHeader` for the provider-verified email.
///
/// Requests must contain an "x-user-email" entry in the header.
#[derive(Debug)]
pub struct UserEmailHeader(pub String);

impl Header for UserEmailHeader {
    fn name() -> &'static axum::http::HeaderName {
        &USER_EMAIL_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(UserEmailHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-user-email header"),
        }
    }
}

async fn auth_gate(
    user_id: Option<TypedHeader<UserIdHeader>>,
    email: Option<TypedHeader<UserEmailHeader>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let (Some(TypedHeader(user_id)), Some(TypedHeader(email))) = (user_id, email) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let authorized = {
        let mut gate = state.gate.lock().await;
        gate.is_authorized(&user_id.0, &email.0)
    };
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }

    request.extensions_mut().insert(ProviderIdentity {
        user_id: user_id.0,
        email: email.0,
    });
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    let gated = Router::new()
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/export", get(exports::export_csv))
        .route(
            "/expenses/{id}",
            axum::routing::patch(expenses::update).delete(expenses::remove),
        )
        .route("/stats", get(statistics::get_stats))
        .route("/analytics", get(analytics::get_analytics))
        .route("/years", get(analytics::get_years))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_gate));

    Router::new()
        .route("/auth/session", post(auth::provider_session))
        .route("/auth/pin", post(auth::submit_pin))
        .route("/auth/signout", post(auth::sign_out))
        .route("/auth/state", get(auth::gate_state))
        .merge(gated)
        .with_state(state)
}

pub async fn run(engine: Engine, gate: Gate) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, gate, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    gate: Gate,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState::new(engine, gate);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    gate: Gate,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, gate, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
