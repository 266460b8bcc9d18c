use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use coastwatch::alerts::AlertStore;
use coastwatch::conditions::ConditionsService;
use coastwatch::server::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    build_router(Arc::new(AppState::new(
        ConditionsService::simulated(),
        "mumbai".into(),
        AlertStore::with_samples(Utc::now()),
    )))
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

#[tokio::test]
async fn test_locations_lists_directory() {
    let (status, body) = get(&app(), "/api/locations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["total_cities"], 13);
    assert_eq!(body["locations"][0]["id"], "mumbai");
    assert_eq!(body["locations"][0]["name"], "Mumbai, India");
}

#[tokio::test]
async fn test_resolve_name_with_spaces() {
    let (status, body) = get(&app(), "/api/resolve/New%20York").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "New York, USA");
    assert_eq!(body["key"], "new_york");
    assert_eq!(body["source"], "directory");
}

#[tokio::test]
async fn test_resolve_coordinate_pair() {
    let (_, body) = get(&app(), "/api/resolve/25.7617,-80.1918").await;
    assert_eq!(body["latitude"], 25.7617);
    assert_eq!(body["longitude"], -80.1918);
    assert_eq!(body["display_name"], "Custom Location (25.7617, -80.1918)");
    assert_eq!(body["formatted_coords"], "25.7617\u{00B0}N, 80.1918\u{00B0}W");
}

#[tokio::test]
async fn test_resolve_unknown_is_stable() {
    let app = app();
    let (_, first) = get(&app, "/api/resolve/Timbuktu").await;
    let (_, second) = get(&app, "/api/resolve/Timbuktu").await;
    assert_eq!(first, second);
    assert_eq!(first["latitude"], -108.6);
    assert_eq!(first["longitude"], -210.4);
    assert_eq!(first["source"], "synthetic");
}

#[tokio::test]
async fn test_data_for_city() {
    let (status, body) = get(&app(), "/api/data/cape-town").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["city_name"], "Cape Town, South Africa");
    assert_eq!(body["timezone"], "Africa/Johannesburg");
    assert_eq!(body["resolved_by"], "directory");
    assert_eq!(body["data"]["weather"]["source"], "realistic_simulation");
    let generated = body["alerts_generated"].as_u64().unwrap();
    assert_eq!(body["alerts"].as_array().unwrap().len() as u64, generated);
}

#[tokio::test]
async fn test_data_defaults_to_configured_location() {
    let (_, body) = get(&app(), "/api/data").await;
    assert_eq!(body["city_name"], "Mumbai, India");
}

#[tokio::test]
async fn test_data_malformed_pair_uses_default_city() {
    let (_, body) = get(&app(), "/api/data/abc,def").await;
    assert_eq!(body["city_name"], "Mumbai, India");
    assert_eq!(body["resolved_by"], "default");
}

#[tokio::test]
async fn test_repeated_polls_do_not_duplicate_alerts() {
    let app = app();
    let (_, first) = get(&app, "/api/data/mumbai").await;
    let (_, after_first) = get(&app, "/api/alerts").await;

    for _ in 0..5 {
        get(&app, "/api/data/mumbai").await;
    }
    let (_, after_many) = get(&app, "/api/alerts").await;
    assert_eq!(after_many["total_alerts"], after_first["total_alerts"]);

    let generated = first["alerts_generated"].as_u64().unwrap();
    assert!(after_first["total_alerts"].as_u64().unwrap() <= 2 + generated);
}

#[tokio::test]
async fn test_resolve_negative_zero_and_ties() {
    let app = app();
    let (_, body) = get(&app, "/api/resolve/-0,5").await;
    assert_eq!(body["display_name"], "Custom Location (0.0000, 5.0000)");

    let (_, body) = get(&app, "/api/resolve/1.03125,-1.03125").await;
    assert_eq!(body["display_name"], "Custom Location (1.0313, -1.0313)");
}

#[tokio::test]
async fn test_demo_alert_not_stored() {
    let app = app();
    let (_, body) = get(&app, "/api/demo/miami").await;
    assert_eq!(body["location"], "Miami, USA");
    assert_eq!(body["demo_alerts"][0]["id"], "demo_001");
    assert_eq!(body["demo_alerts"][0]["alert_type"], "storm_risk");

    let (_, alerts) = get(&app, "/api/alerts").await;
    assert!(alerts["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["id"] != "demo_001"));
}

#[tokio::test]
async fn test_alert_lifecycle() {
    let app = app();
    let (_, body) = get(&app, "/api/alerts").await;
    assert_eq!(body["total_alerts"], 2);
    let id = body["alerts"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/alerts/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/alerts/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);

    let (_, body) = get(&app, "/api/alerts").await;
    assert_eq!(body["total_alerts"], 1);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["data_service"], "simulated");
}

#[tokio::test]
async fn test_api_responses_not_cached() {
    let request = Request::builder().uri("/api/").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
}
