//! Router construction
//!
//! Each feature group is served twice: under its short name and under its
//! legacy name (`/classify` and `/primitive-patterns`, and so on).

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;
use axum::http::{HeaderValue, Request};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

/// Feature groups as (short name, legacy name)
pub const GROUP_ALIASES: [(&str, &str); 5] = [
    ("/classify", "/primitive-patterns"),
    ("/context", "/scoped-values"),
    ("/concurrency-demo", "/structured-concurrency"),
    ("/deferred", "/stable-values"),
    ("/module-imports", "/module-imports"),
];

/// Fresh v4 UUID for every request without an `x-request-id`
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/process", post(handlers::process))
        .route("/check-type", post(handlers::check_type))
        .route("/convert", post(handlers::convert))
        .route("/validate", post(handlers::validate))
}

fn context_routes() -> Router<AppState> {
    Router::new()
        .route("/context", get(handlers::with_context))
        .route("/concurrency", get(handlers::with_concurrency))
        .route("/nested", get(handlers::nested))
        .route("/default", get(handlers::default_context))
}

fn concurrency_routes() -> Router<AppState> {
    Router::new()
        .route("/user-data", get(handlers::user_data))
        .route("/multi-source", get(handlers::multi_source))
        .route("/timeout", get(handlers::timeout))
        .route("/virtual-threads", get(handlers::workers))
        .route("/aggregate", get(handlers::aggregate))
}

fn deferred_routes() -> Router<AppState> {
    Router::new()
        .route("/lazy-config", get(handlers::lazy_config))
        .route("/connection", get(handlers::connection))
        .route("/expensive", get(handlers::expensive))
        .route("/race", get(handlers::race))
        .route("/counts", get(handlers::init_counts))
}

fn module_routes() -> Router<AppState> {
    Router::new()
        .route("/info", get(handlers::module_info))
        .route("/example", get(handlers::module_example))
        .route("/compare", get(handlers::module_compare))
}

/// Every route, relative to the configured prefix
fn api_routes() -> Router<AppState> {
    let groups = [
        classify_routes(),
        context_routes(),
        concurrency_routes(),
        deferred_routes(),
        module_routes(),
    ];

    let mut api = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health));

    for ((name, legacy), group) in GROUP_ALIASES.into_iter().zip(groups) {
        if name != legacy {
            api = api.nest(legacy, group.clone());
        }
        api = api.nest(name, group);
    }
    api
}

/// Build the full application router for `state`
pub fn router(state: AppState) -> Router {
    let prefix = state.config.normalized_prefix();
    let api = api_routes();
    let app = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&prefix, api)
    };

    tracing::info!(prefix = %prefix, groups = GROUP_ALIASES.len(), "routes registered");

    app.layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Router for `config` with freshly built components
pub fn app(config: ServerConfig) -> Router {
    router(AppState::new(config))
}
