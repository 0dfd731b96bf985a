use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::alerts::{self, AlertMessage};
use crate::charts::{self, ChartRegistry, Dashboard};
use crate::feed::{FeedSnapshot, MeasurementRow};
use crate::lakes::{self, Lake, MAP_CENTER};
use crate::metrics::select_lake;

/// Application state shared across handlers.
///
/// The feed snapshot is immutable for the whole session; the chart registry
/// is the only mutable state and tracks what the sinks currently render.
pub struct AppState {
    pub feed: FeedSnapshot,
    pub charts: RwLock<ChartRegistry>,
    pub authority_email: String,
}

// ============================================================================
// Health Check
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub feed_rows: usize,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        feed_rows: state.feed.len(),
    })
}

// ============================================================================
// Raw feed
// ============================================================================

/// The raw measurement rows, serialized back out with the feed's wire keys.
pub async fn feed_data(State(state): State<Arc<AppState>>) -> Json<Vec<MeasurementRow>> {
    Json(state.feed.rows().to_vec())
}

// ============================================================================
// Lakes and markers
// ============================================================================

#[derive(Serialize)]
pub struct LakesResponse {
    /// Initial map viewport center.
    pub center: [f64; 2],
    pub lakes: Vec<&'static Lake>,
}

pub async fn list_lakes() -> Json<LakesResponse> {
    Json(LakesResponse {
        center: MAP_CENTER,
        lakes: lakes::LAKES.iter().collect(),
    })
}

pub async fn lake_details(Path(name): Path<String>) -> Result<Json<&'static Lake>, ApiError> {
    lakes::find(&name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Lake '{name}' not found")))
}

// ============================================================================
// Dashboard
// ============================================================================

/// Either the full derived dashboard or the explicit no-data state. No-data
/// is a defined outcome, not an error, so both serve with status 200.
#[derive(Serialize)]
#[serde(untagged)]
pub enum DashboardResponse {
    Data(Box<Dashboard>),
    NoData {
        lake: String,
        no_data: bool,
        message: String,
    },
}

pub async fn lake_dashboard(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Json<DashboardResponse> {
    // The registry name wins for display when the path name only differs in
    // case; an entirely unknown name is still selected against the feed.
    let display_name = lakes::find(&name)
        .map(|lake| lake.name.to_string())
        .unwrap_or_else(|| name.clone());

    let selection = select_lake(state.feed.rows(), &name);
    match charts::build_dashboard(&display_name, &selection) {
        Some(dashboard) => {
            dashboard.register_into(&mut state.charts.write());
            Json(DashboardResponse::Data(Box::new(dashboard)))
        }
        None => {
            let cleared = state.charts.write().clear();
            tracing::debug!(
                lake = %display_name,
                charts_cleared = cleared,
                "no rows for selection"
            );
            Json(DashboardResponse::NoData {
                message: format!("No data found for {display_name}"),
                lake: display_name,
                no_data: true,
            })
        }
    }
}

// ============================================================================
// Alerts
// ============================================================================

#[derive(Deserialize)]
pub struct AlertRequest {
    pub lake: String,
    pub message: String,
    #[serde(default)]
    pub location: Option<String>,
}

pub async fn compose_alert(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AlertRequest>,
) -> Result<Json<AlertMessage>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "alert message must not be empty".to_string(),
        ));
    }

    let selection = select_lake(state.feed.rows(), &request.lake);
    let message = alerts::compose(
        &state.authority_email,
        &request.lake,
        &request.message,
        request.location.as_deref(),
        selection.latest(),
        chrono::Utc::now(),
    );
    alerts::dispatch(&request.lake, &message);

    Ok(Json(message))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
