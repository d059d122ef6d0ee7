//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use variant_cache::{api::create_router, AppState, Config};

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::from_config(&Config::default()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == SET / GET ==

#[tokio::test]
async fn test_set_then_get() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        json_request(
            "PUT",
            "/cache",
            json!({"key": "tpl1-Acme", "value": [{"headline": "Acme"}], "ttl_ms": 600000}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("tpl1-Acme"));
    assert_eq!(json["ttl_ms"], 600000);

    let (status, json) = send(&app, empty_request("GET", "/cache/tpl1-Acme")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "tpl1-Acme");
    assert_eq!(json["value"], json!([{"headline": "Acme"}]));
}

#[tokio::test]
async fn test_falsy_values_are_hits() {
    let app = create_test_app();

    for (key, value) in [("zero", json!(0)), ("no", json!(false)), ("nil", Value::Null)] {
        let body = json!({"key": key, "value": value.clone()});
        send(&app, json_request("PUT", "/cache", body)).await;

        let uri = format!("/cache/{}", key);
        let (status, json) = send(&app, empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::OK, "{} should be a hit", key);
        assert_eq!(json["value"], value);
    }
}

#[tokio::test]
async fn test_negative_ttl_is_stale_immediately() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        json_request("PUT", "/cache", json!({"key": "k", "value": "v", "ttl_ms": -10})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, empty_request("GET", "/cache/k")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_set_empty_key_rejected() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        json_request("PUT", "/cache", json!({"key": "", "value": "v"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

// == DELETE ==

#[tokio::test]
async fn test_delete_and_clear() {
    let app = create_test_app();
    for key in ["a", "b", "c"] {
        send(&app, json_request("PUT", "/cache", json!({"key": key, "value": key}))).await;
    }

    let (status, json) = send(&app, empty_request("DELETE", "/cache/a")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], true);

    let (status, json) = send(&app, empty_request("DELETE", "/cache/a")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], false);

    let (_, json) = send(&app, empty_request("DELETE", "/cache")).await;
    assert_eq!(json["removed"], 2);

    let (status, _) = send(&app, empty_request("GET", "/cache/b")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == VARIANTS ==

#[tokio::test]
async fn test_generate_variants_then_cached() {
    let app = create_test_app();
    let body = json!({
        "templateId": " BoldRed ",
        "productData": {"productName": "Acme", "features": ["Fast", "Beautiful design"]}
    });

    let (status, first) = send(&app, json_request("POST", "/variants", body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["cached"], false);

    let variants = first["variants"].as_array().unwrap();
    assert_eq!(variants.len(), 3);
    assert_eq!(variants[0]["id"], "variant-A");
    assert_eq!(variants[0]["template"], "BoldRed");
    assert_eq!(variants[1]["layoutEmphasis"], "benefits");
    assert_eq!(variants[1]["data"]["features"][0], "Beautiful design");

    let (_, second) = send(&app, json_request("POST", "/variants", body)).await;
    assert_eq!(second["cached"], true);
    assert_eq!(second["variants"], first["variants"]);
}

#[tokio::test]
async fn test_generate_variants_blank_template() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/variants",
            json!({"templateId": "  ", "productData": {"productName": "Acme"}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == STATS / HEALTH ==

#[tokio::test]
async fn test_stats_reflect_operations() {
    let app = create_test_app();

    send(&app, json_request("PUT", "/cache", json!({"key": "k", "value": 1}))).await;
    send(&app, empty_request("GET", "/cache/k")).await;
    send(&app, empty_request("GET", "/cache/missing")).await;

    let (status, json) = send(&app, empty_request("GET", "/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["entries"]["hits"], 1);
    assert_eq!(json["entries"]["misses"], 1);
    assert_eq!(json["entries"]["total_entries"], 1);
    assert_eq!(json["variants"]["total_entries"], 0);
}

#[tokio::test]
async fn test_sweep_endpoint() {
    let app = create_test_app();
    send(
        &app,
        json_request("PUT", "/cache", json!({"key": "stale", "value": 1, "ttl_ms": 0})),
    )
    .await;

    let (status, json) = send(&app, empty_request("POST", "/cache/sweep")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
