#![cfg(feature = "server")]

use agrisk_kernel::domain::config::DashboardConfig;
use agrisk_kernel::domain::ward::WardRegistry;
use agrisk_kernel::server::state::ApiState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let config = DashboardConfig::default();
    let slice = agrisk_assessment::init(&config, Arc::new(WardRegistry::gatundu_north()))
        .expect("assessment init");
    let state = ApiState::builder().config(config).register_slice(slice).build().unwrap();

    let (router, _) = agrisk_assessment::router().split_for_parts();
    router.with_state(state)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn post(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/assessments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn assesses_wards_with_fallback() {
    let body = json!({ "observations": [
        { "ward": "Chania Ward", "temperature": 28.0, "soilMoisture": 60.0, "vegetationIndex": 0.65 },
        { "ward": "Gituamba", "temperature": 28.0, "soilMoisture": 60.0, "vegetationIndex": 0.65 },
    ]});

    let (status, body) = send(post(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallbackInUse"], true);
    assert_eq!(body["notice"], "Model not found. Using simulated predictions.");

    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["ward"], "Chania Ward");
    assert!((results[0]["probability"].as_f64().unwrap() - 0.475).abs() < 1e-9);
    assert_eq!(results[0]["tier"], "MODERATE");
    assert_eq!(results[0]["source"]["kind"], "fallback");
    assert_eq!(results[0]["source"]["reason"], "modelUnavailable");
    assert_eq!(results[0]["recommendation"]["premium"], "Moderate Premium (10-20% increase)");

    assert_eq!(results[1]["ward"], "Gituamba Ward");
    assert!((results[1]["probability"].as_f64().unwrap() - 0.57).abs() < 1e-9);
    assert!((results[1]["multiplier"].as_f64().unwrap() - 1.2).abs() < f64::EPSILON);
}

#[tokio::test]
async fn readings_are_clamped_before_estimation() {
    let body = json!({ "observations": [
        { "ward": "Mang'u Ward", "temperature": 45.0, "soilMoisture": 5.0, "vegetationIndex": 1.5 },
    ]});

    let (status, body) = send(post(&body)).await;
    assert_eq!(status, StatusCode::OK);
    let input = &body["results"][0]["input"];
    assert_eq!(input["temperature"], 40.0);
    assert_eq!(input["soilMoisture"], 20.0);
    assert_eq!(input["vegetationIndex"], 1.0);
}

#[tokio::test]
async fn rejects_bad_batches() {
    let (status, body) = send(post(&json!({ "observations": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let unknown = json!({ "observations": [
        { "ward": "Kamwangi", "temperature": 28.0, "soilMoisture": 60.0, "vegetationIndex": 0.65 },
    ]});
    let (status, body) = send(post(&unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let malformed = json!({ "observations": [
        { "ward": "Chania Ward", "temperature": "hot", "soilMoisture": 60.0, "vegetationIndex": 0.65 },
    ]});
    let (status, body) = send(post(&malformed)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "unprocessable_entity");
    assert!(body["message"].as_str().unwrap().contains("temperature"));
}

#[tokio::test]
async fn unparsable_body_is_a_json_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/assessments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ \"observations\": ["))
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn lists_defaults_and_model_status() {
    let (status, body) = send(get("/api/assessments/defaults")).await;
    assert_eq!(status, StatusCode::OK);
    let defaults = body.as_array().unwrap();
    assert_eq!(defaults.len(), 4);
    let gituamba = defaults.iter().find(|d| d["ward"] == "Gituamba Ward").unwrap();
    assert_eq!(gituamba["temperature"], 32.0);
    assert_eq!(gituamba["soilMoisture"], 45.0);
    assert_eq!(gituamba["exposure"], "droughtProne");

    let (status, body) = send(get("/api/model")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loaded"], false);
    assert_eq!(body["reason"], "no model path configured");
}
