//! Request handlers
//!
//! Thin adapters: decode the request, call one component operation, encode
//! the result. Text results go out as `text/plain`, records as JSON.

use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use showcase_core::{
    Context, DatabaseConnection, ExpensiveResult, InitCounts, RaceReport, Scalar, SpawnMode,
    Summary, APPLICATION, FEATURES,
};

type ApiResult<T> = Result<T, ApiError>;

/// Decode a bare JSON scalar body
fn scalar_body(body: &Bytes) -> ApiResult<Scalar> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("request body is empty".to_string()));
    }
    serde_json::from_slice::<Value>(body)
        .map(Scalar::from)
        .map_err(|e| ApiError::BadRequest(format!("body is not valid JSON: {e}")))
}

// Index and health

pub async fn index(State(state): State<AppState>) -> Json<Value> {
    let prefix = state.config.normalized_prefix();
    Json(json!({
        "message": "Java 25 New Features Demo API",
        "features": FEATURES,
        "endpoints": {
            "classify": format!("{prefix}/classify"),
            "context": format!("{prefix}/context"),
            "concurrency-demo": format!("{prefix}/concurrency-demo"),
            "deferred": format!("{prefix}/deferred"),
            "module-imports": format!("{prefix}/module-imports"),
        },
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "UP",
        "version": crate::VERSION,
        "application": APPLICATION,
    }))
}

// Classification

pub async fn process(State(state): State<AppState>, body: Bytes) -> ApiResult<String> {
    let value = scalar_body(&body)?;
    Ok(state.showcase.primitives().process_primitive(&value))
}

pub async fn check_type(State(state): State<AppState>, body: Bytes) -> ApiResult<String> {
    let value = scalar_body(&body)?;
    Ok(state.showcase.primitives().check_primitive_type(&value))
}

pub async fn convert(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<i32>> {
    let value = scalar_body(&body)?;
    Ok(Json(state.showcase.primitives().safe_convert_to_int(&value)?))
}

pub async fn validate(State(state): State<AppState>, body: Bytes) -> ApiResult<String> {
    let value = scalar_body(&body)?;
    Ok(state.showcase.primitives().validate_number(&value))
}

// Scoped context

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextParams {
    user_id: String,
    request_id: String,
    tenant_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcurrencyParams {
    user_id: String,
    #[serde(default)]
    mode: SpawnMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultContext {
    has_context: bool,
    user_id: String,
}

pub async fn with_context(
    State(state): State<AppState>,
    Query(params): Query<ContextParams>,
) -> ApiResult<String> {
    Ok(state
        .showcase
        .scoped()
        .process_with_context(&params.user_id, &params.request_id, &params.tenant_id)?)
}

pub async fn with_concurrency(
    State(state): State<AppState>,
    Query(params): Query<ConcurrencyParams>,
) -> ApiResult<String> {
    Ok(state
        .showcase
        .scoped()
        .process_with_concurrency(&params.user_id, params.mode)
        .await?)
}

pub async fn nested(State(state): State<AppState>) -> String {
    state.showcase.scoped().nested_scopes()
}

/// Reads the user from a request that binds nothing
pub async fn default_context(State(state): State<AppState>) -> Json<DefaultContext> {
    let ctx = Context::root();
    let scoped = state.showcase.scoped();
    Json(DefaultContext {
        has_context: scoped.has_user_context(&ctx),
        user_id: scoped.user_id_or_default(&ctx),
    })
}

// Structured concurrency

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    query: String,
}

#[derive(Debug, Deserialize)]
pub struct DataParams {
    data: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    category: String,
}

pub async fn user_data(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> ApiResult<String> {
    Ok(state.showcase.structured().fetch_user_data(&params.user_id).await?)
}

pub async fn multi_source(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<String> {
    Ok(state
        .showcase
        .structured()
        .fetch_from_multiple_sources(&params.query)
        .await?)
}

pub async fn timeout(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> ApiResult<String> {
    Ok(state
        .showcase
        .structured()
        .fetch_with_timeout(&params.user_id)
        .await?)
}

pub async fn workers(
    State(state): State<AppState>,
    Query(params): Query<DataParams>,
) -> ApiResult<String> {
    Ok(state
        .showcase
        .structured()
        .process_with_workers(&params.data)
        .await?)
}

pub async fn aggregate(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> ApiResult<Json<Summary>> {
    Ok(Json(
        state.showcase.structured().aggregate_data(&params.category).await?,
    ))
}

// Deferred values

pub async fn lazy_config(State(state): State<AppState>) -> String {
    state.showcase.stable().lazy_config().await
}

pub async fn connection(State(state): State<AppState>) -> Json<DatabaseConnection> {
    Json(state.showcase.stable().connection().await)
}

pub async fn expensive(State(state): State<AppState>) -> Json<ExpensiveResult> {
    Json(state.showcase.stable().expensive_result().await)
}

pub async fn race(State(state): State<AppState>) -> ApiResult<Json<RaceReport>> {
    Ok(Json(state.showcase.stable().race_initialization().await?))
}

pub async fn init_counts(State(state): State<AppState>) -> Json<InitCounts> {
    Json(state.showcase.stable().init_counts())
}

// Module imports

pub async fn module_info(State(state): State<AppState>) -> &'static str {
    state.showcase.modules().demonstrate_module_import()
}

pub async fn module_example(State(state): State<AppState>) -> &'static str {
    state.showcase.modules().module_example()
}

pub async fn module_compare(State(state): State<AppState>) -> &'static str {
    state.showcase.modules().compare_approaches()
}
