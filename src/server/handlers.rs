use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::alerts::{Alert, AlertKind, Severity};
use crate::conditions::CoastalSnapshot;
use crate::location::{self, format_coords, CityInfo, LocationSource, ResolvedLocation};

use super::state::AppState;

pub const SERVICE_NAME: &str = "Coastal Threat Alert System";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ─── GET /api/ ───────────────────────────────────────────────────

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Coastal Threat Alert System API",
        "version": VERSION,
        "status": "operational",
        "endpoints": {
            "data": "/api/data/{location} - Coastal readings and alerts for a location",
            "demo": "/api/demo/{location} - Readings plus a demonstration alert",
            "resolve": "/api/resolve/{query} - Coordinates and display name for a location",
            "locations": "/api/locations - Built-in coastal cities",
            "alerts": "/api/alerts - Active alerts",
            "health": "/api/health - Health check"
        }
    }))
}

// ─── GET /api/locations ──────────────────────────────────────────

#[derive(Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<CityInfo>,
    pub status: &'static str,
    pub total_cities: usize,
}

pub async fn locations() -> Json<LocationsResponse> {
    let locations = location::city_list();
    Json(LocationsResponse {
        total_cities: locations.len(),
        locations,
        status: "success",
    })
}

// ─── GET /api/resolve/{query} ────────────────────────────────────

#[derive(Serialize)]
pub struct ResolveResponse {
    #[serde(flatten)]
    pub location: ResolvedLocation,
    pub formatted_coords: String,
}

pub async fn resolve(Path(query): Path<String>) -> Json<ResolveResponse> {
    let start = Instant::now();
    let resolved = location::resolve(&query);
    info!(
        query = %query,
        tier = %resolved.source,
        name = %resolved.display_name,
        elapsed_ms = elapsed_ms(start),
        "GET /api/resolve"
    );

    Json(ResolveResponse {
        formatted_coords: format_coords(resolved.latitude, resolved.longitude),
        location: resolved,
    })
}

// ─── GET /api/data/{location} ────────────────────────────────────

#[derive(Serialize)]
pub struct DataResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub location: String,
    pub city_name: String,
    pub country: String,
    pub timezone: String,
    pub resolved_by: LocationSource,
    pub data: CoastalSnapshot,
    pub alerts_generated: usize,
    pub alerts: Vec<Alert>,
    pub source: &'static str,
}

/// Resolve and snapshot off the async runtime; the weather provider blocks.
async fn snapshot_for(state: &Arc<AppState>, query: &str) -> Result<(ResolvedLocation, CoastalSnapshot), ApiError> {
    let resolved = location::resolve(query);
    let conditions = state.conditions.clone();
    let target = resolved.clone();
    let snapshot = tokio::task::spawn_blocking(move || conditions.snapshot(&target, Utc::now()))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Error fetching data for location {}: {}", query, e)))?;
    Ok((resolved, snapshot))
}

pub async fn data(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> Result<Json<DataResponse>, ApiError> {
    data_for(state, query).await
}

pub async fn data_default(State(state): State<Arc<AppState>>) -> Result<Json<DataResponse>, ApiError> {
    let query = state.default_location.clone();
    data_for(state, query).await
}

async fn data_for(state: Arc<AppState>, query: String) -> Result<Json<DataResponse>, ApiError> {
    let start = Instant::now();
    let (resolved, snapshot) = snapshot_for(&state, &query).await?;
    let alerts = state.alerts().record(&snapshot);

    info!(
        query = %query,
        tier = %resolved.source,
        alerts = alerts.len(),
        elapsed_ms = elapsed_ms(start),
        "GET /api/data"
    );

    Ok(Json(DataResponse {
        status: "success",
        timestamp: snapshot.timestamp,
        location: snapshot.location.clone(),
        city_name: snapshot.city_name.clone(),
        country: snapshot.country.clone(),
        timezone: snapshot.timezone.clone(),
        resolved_by: resolved.source,
        alerts_generated: alerts.len(),
        alerts,
        data: snapshot,
        source: "unified_data_service",
    }))
}

// ─── GET /api/demo/{location} ────────────────────────────────────

#[derive(Serialize)]
pub struct DemoResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub location: String,
    pub data: CoastalSnapshot,
    pub demo_alerts: Vec<Alert>,
    pub timestamp: DateTime<Utc>,
}

pub async fn demo(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> Result<Json<DemoResponse>, ApiError> {
    let (_, snapshot) = snapshot_for(&state, &query).await?;
    let now = Utc::now();

    // Demo alerts are never stored.
    let demo_alert = Alert {
        id: "demo_001".into(),
        alert_type: AlertKind::StormRisk,
        severity: Severity::Medium,
        location: snapshot.location.clone(),
        description: "Demo: Storm conditions detected. This is a demonstration alert.".into(),
        is_active: true,
        triggered_by: "demo_mode".into(),
        timestamp: now,
        source: "demo_service".into(),
    };

    info!(query = %query, "GET /api/demo");

    Ok(Json(DemoResponse {
        status: "success",
        message: "Demo data for presentation",
        location: snapshot.city_name.clone(),
        data: snapshot,
        demo_alerts: vec![demo_alert],
        timestamp: now,
    }))
}

// ─── /api/alerts ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AlertsResponse {
    pub status: &'static str,
    pub alerts: Vec<Alert>,
    pub total_alerts: usize,
    pub timestamp: DateTime<Utc>,
}

pub async fn alerts(State(state): State<Arc<AppState>>) -> Json<AlertsResponse> {
    let alerts = state.alerts().active();
    Json(AlertsResponse {
        status: "success",
        total_alerts: alerts.len(),
        alerts,
        timestamp: Utc::now(),
    })
}

pub async fn deactivate_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.alerts().deactivate(&id) {
        info!(alert = %id, "DELETE /api/alerts -> not found");
        return Err(api_error(StatusCode::NOT_FOUND, "Alert not found"));
    }

    info!(alert = %id, "DELETE /api/alerts -> deactivated");
    Ok(Json(json!({
        "status": "success",
        "message": format!("Alert {} deactivated successfully", id),
    })))
}

// ─── GET /api/health ─────────────────────────────────────────────

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let now = Utc::now();
    let data_service = if state.conditions.is_live() { "live" } else { "simulated" };
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": VERSION,
        "timestamp": now,
        "uptime_seconds": (now - state.started_at).num_seconds(),
        "components": {
            "location_resolver": "operational",
            "data_service": data_service,
            "alert_service": "operational",
        }
    }))
}
