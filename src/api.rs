//! HTTP surface: the expenses route plus health and metrics.

use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{DefaultBodyLimit, FromRequest, State},
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::{json, Value};
use spendlog_core::{Expense, ExpenseStore};
use tower_http::trace::TraceLayer;

use crate::{error::ApiError, validation::validate_expense};

pub const EXPENSES_PATH: &str = "/api/expenses";

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ExpenseStore>,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store, metrics: None }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(
            EXPENSES_PATH,
            get(list_expenses)
                .post(create_expense)
                // an explicit head route keeps HEAD from falling through to GET
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Request body decoded as JSON, with an empty body read as `{}`.
///
/// Any read or parse failure becomes `ApiError::InvalidJson` before
/// validation runs.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S, B> FromRequest<S, B> for JsonBody
where
    Bytes: FromRequest<S, B>,
    B: Send + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::InvalidJson)?;
        if bytes.is_empty() {
            return Ok(JsonBody(Value::Object(Default::default())));
        }
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|_| ApiError::InvalidJson)
    }
}

#[derive(Serialize)]
struct ListResponse<'a> {
    success: bool,
    count: usize,
    data: &'a [Expense],
}

#[derive(Serialize)]
struct CreatedResponse<'a> {
    success: bool,
    data: &'a Expense,
}

/// Serializes up front so a failure maps to a generic 500 instead of
/// axum's plain-text rejection.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(body)?;
    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        bytes,
    )
        .into_response())
}

async fn list_expenses(State(state): State<AppState>) -> Result<Response, ApiError> {
    let expenses = state.store.list_expenses()?;
    json_response(
        StatusCode::OK,
        &ListResponse {
            success: true,
            count: expenses.len(),
            data: &expenses,
        },
    )
}

async fn create_expense(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Response, ApiError> {
    let command = validate_expense(&body)?;
    let expense = state.store.create_expense(&command)?;

    metrics::increment_counter!("spendlog_expenses_created_total");
    if let Ok(count) = state.store.count() {
        metrics::gauge!("spendlog_expenses_stored", count as f64);
    }
    tracing::debug!(id = expense.id, amount = expense.amount, category = %expense.category, "Expense created");

    json_response(
        StatusCode::CREATED,
        &CreatedResponse {
            success: true,
            data: &expense,
        },
    )
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let count = state.store.count()?;
    Ok(Json(json!({ "status": "ok", "expenses": count })))
}

async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
