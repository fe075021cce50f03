//! Router integration tests, driven in-process with `oneshot`

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use showcase_server::{app, ServerConfig};
use showcase_test_utils::{
    api_path, fast_config, get_request, post_json, send, send_json, test_router,
};

#[tokio::test]
async fn classify_large_integer() {
    let (status, body) = send(test_router(), post_json(&api_path("/classify/process"), "150")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Integer grande: 150");
}

#[tokio::test]
async fn classify_null_body() {
    let (status, body) = send(test_router(), post_json(&api_path("/classify/process"), "null")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Null value");
}

#[tokio::test]
async fn classify_unknown_type() {
    let (_, body) = send(test_router(), post_json(&api_path("/classify/process"), "[1, 2]")).await;
    assert_eq!(body, "Tipo desconocido: ArrayList");
}

#[tokio::test]
async fn check_type_and_validate() {
    let (_, body) = send(test_router(), post_json(&api_path("/classify/check-type"), "3.14")).await;
    assert_eq!(body, "Es un double con valor: 3.14");

    let (_, body) = send(test_router(), post_json(&api_path("/classify/validate"), "0")).await;
    assert_eq!(body, "Cero");
}

#[tokio::test]
async fn convert_text_number() {
    let (status, body) = send_json(test_router(), post_json(&api_path("/classify/convert"), "\"123\"")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(123));
}

#[tokio::test]
async fn convert_malformed_number_is_server_error() {
    let (status, body) = send_json(test_router(), post_json(&api_path("/classify/convert"), "\"abc\"")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn invalid_json_body_is_bad_request() {
    let (status, body) = send_json(test_router(), post_json(&api_path("/classify/process"), "{oops")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn legacy_group_name_serves_same_route() {
    let (status, body) = send(
        test_router(),
        post_json(&api_path("/primitive-patterns/process"), "50"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Integer pequeño: 50");
}

#[tokio::test]
async fn context_echoes_bindings() {
    let (status, body) = send(
        test_router(),
        get_request(&api_path("/context/context?userId=u1&requestId=r1&tenantId=t1")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Procesando operación - User: u1, Request: r1, Tenant: t1");
}

#[tokio::test]
async fn context_missing_param_is_bad_request() {
    let (status, _) = send(
        test_router(),
        get_request(&api_path("/context/context?userId=u1")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn concurrency_bare_and_inherited() {
    let (_, bare) = send(
        test_router(),
        get_request(&api_path("/context/concurrency?userId=user999")),
    )
    .await;
    assert_eq!(bare, "Task 1 ejecutada por:  | Task 2 ejecutada por: ");

    let (_, inherited) = send(
        test_router(),
        get_request(&api_path("/scoped-values/concurrency?userId=user999&mode=inherited")),
    )
    .await;
    assert_eq!(
        inherited,
        "Task 1 ejecutada por: user999 | Task 2 ejecutada por: user999"
    );
}

#[tokio::test]
async fn nested_scopes() {
    let (_, body) = send(test_router(), get_request(&api_path("/context/nested"))).await;

    let parts: Vec<&str> = body.split(" | ").collect();
    assert_eq!(parts, ["Outer tenant: tenant-1", "Inner tenant: tenant-2"]);
}

#[tokio::test]
async fn default_context_is_anonymous() {
    let (_, body) = send_json(test_router(), get_request(&api_path("/context/default"))).await;
    assert_eq!(body, json!({"hasContext": false, "userId": "usuario-anonimo"}));
}

#[tokio::test]
async fn fan_out_endpoints() {
    let (_, body) = send(
        test_router(),
        get_request(&api_path("/concurrency-demo/user-data?userId=u1")),
    )
    .await;
    assert_eq!(body, "User: Profile-u1, Orders: Orders-u1, Preferences: Preferences-u1");

    let (_, body) = send(
        test_router(),
        get_request(&api_path("/structured-concurrency/virtual-threads?data=d")),
    )
    .await;
    assert_eq!(body, "Resultados: [Processed1-d, Processed2-d, Processed3-d]");

    let (_, body) = send(
        test_router(),
        get_request(&api_path("/concurrency-demo/timeout?userId=u1")),
    )
    .await;
    assert_eq!(body, "SlowOp1-u1 | SlowOp2-u1");
}

#[tokio::test]
async fn aggregate_returns_summary() {
    let (status, body) = send_json(
        test_router(),
        get_request(&api_path("/concurrency-demo/aggregate?category=ventas")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"count": 42, "sum": 1234.56, "average": 29.39, "max": 999})
    );
}

#[tokio::test(start_paused = true)]
async fn expired_deadline_is_gateway_timeout() {
    let router = app(ServerConfig::new().with_timeout_ms(1200));
    let (status, body) = send_json(
        router,
        get_request(&api_path("/concurrency-demo/timeout?userId=u1")),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn deferred_values_are_stable() {
    let router = test_router();

    let (_, first) = send(router.clone(), get_request(&api_path("/deferred/lazy-config"))).await;
    let (_, second) = send(router.clone(), get_request(&api_path("/stable-values/lazy-config"))).await;
    assert!(first.starts_with("config-loaded-"));
    assert_eq!(first, second);

    let (_, conn) = send_json(router.clone(), get_request(&api_path("/deferred/connection"))).await;
    assert_eq!(conn, json!({"host": "localhost", "port": 5432}));

    let (_, expensive) = send_json(router.clone(), get_request(&api_path("/deferred/expensive"))).await;
    assert_eq!(expensive, json!({"data": "resultado-complejo", "value": 42}));

    let (_, counts) = send_json(router, get_request(&api_path("/deferred/counts"))).await;
    assert_eq!(counts, json!({"config": 1, "connection": 1, "expensive": 1}));
}

#[tokio::test]
async fn race_reports_single_producer() {
    let (_, body) = send_json(test_router(), get_request(&api_path("/deferred/race"))).await;

    assert_eq!(body["producer_runs"], json!(1));
    let winner = body["winner"].clone();
    assert_eq!(body["observed"], json!([winner, winner]));
}

#[tokio::test]
async fn module_import_texts() {
    let (_, info) = send(test_router(), get_request(&api_path("/module-imports/info"))).await;
    assert!(info.contains("Module Import Declarations simplifica"));

    let (_, example) = send(test_router(), get_request(&api_path("/module-imports/example"))).await;
    assert!(example.contains("import module com.monghit.features;"));

    let (_, compare) = send(test_router(), get_request(&api_path("/module-imports/compare"))).await;
    assert!(compare.contains("Comparación de Imports"));
}

#[tokio::test]
async fn index_lists_features_and_groups() {
    let (status, body) = send_json(test_router(), get_request("/api/java25")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Java 25 New Features Demo API");
    assert_eq!(body["features"].as_array().unwrap().len(), 8);
    assert_eq!(body["endpoints"]["classify"], "/api/java25/classify");
}

#[tokio::test]
async fn health_is_up() {
    let (status, body) = send_json(test_router(), get_request(&api_path("/health"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(body["application"], "Java 25 Features Demo");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn custom_prefix() {
    let router = app(fast_config().with_prefix("/demo/"));

    let (status, body) = send(router.clone(), post_json("/demo/classify/validate", "-5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Número negativo");

    let (status, _) = send(router, get_request(&api_path("/health"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_id_is_assigned() {
    let response = tower::ServiceExt::oneshot(test_router(), get_request(&api_path("/health")))
        .await
        .unwrap();

    let id = response.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36);
}
