#![cfg(feature = "server")]

use agrisk_kernel::domain::config::DashboardConfig;
use agrisk_kernel::domain::ward::WardRegistry;
use agrisk_kernel::server::state::ApiState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let mut config = DashboardConfig::default();
    config.history.seed = Some(2021);
    let slice = agrisk_history::init(&config, Arc::new(WardRegistry::gatundu_north())).unwrap();
    let state = ApiState::builder().config(config).register_slice(slice).build().unwrap();

    let (router, _) = agrisk_history::router().split_for_parts();
    router.with_state(state)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response =
        app().oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn all_wards_by_default() {
    let (status, body) = get("/api/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstYear"], 2018);
    assert_eq!(body["lastYear"], 2023);
    assert_eq!(body["records"].as_array().unwrap().len(), 24);
    assert_eq!(body["droughtImpact"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn selected_wards_only() {
    let (status, body) = get("/api/history?wards=Chania%20Ward,gituamba").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wards"], serde_json::json!(["Chania Ward", "Gituamba Ward"]));

    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 12);
    assert!(records.iter().all(|r| r["ward"] == "Chania Ward" || r["ward"] == "Gituamba Ward"));

    let drought = records
        .iter()
        .find(|r| r["ward"] == "Gituamba Ward" && r["year"] == 2021)
        .unwrap();
    assert!((drought["stressLevel"].as_f64().unwrap() - 0.88).abs() < 1e-9);
}

#[tokio::test]
async fn seeded_history_is_stable() {
    let (_, first) = get("/api/history?wards=Mang'u").await;
    let (_, second) = get("/api/history?wards=Mang'u").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_ward_is_not_found() {
    let (status, body) = get("/api/history?wards=Chania,Kamwangi").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}
