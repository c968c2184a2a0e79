use crate::classify::classify_with;
use crate::config::{AppConfig, MapConfig};
use crate::data::BandTable;
use crate::render::{pin_message, region_message, NO_SELECTION_PROMPT};
use crate::types::{Coordinate, CoordinateError, RegionRecord};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub table: BandTable,
    pub map: MapConfig,
}

/// Both fields optional: a request without a click is the no-selection state.
/// Empty values (`?lat=&lon=`) count as absent.
#[derive(Deserialize)]
pub struct QueryParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    lat: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    lon: Option<f64>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid number {:?}: {}", s, e))),
    }
}

#[derive(Serialize, Debug)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClassifyResponse {
    NoSelection {
        message: &'static str,
    },
    Located {
        lat: f64,
        lon: f64,
        region: String,
        pin: String,
        message: String,
        data: RegionRecord,
    },
}

#[derive(Debug)]
pub enum ApiError {
    InvalidCoordinate(CoordinateError),
    InvalidQuery(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::InvalidCoordinate(e) => e.to_string(),
            ApiError::InvalidQuery(text) => text,
        };
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
    }
}

impl From<CoordinateError> for ApiError {
    fn from(e: CoordinateError) -> Self {
        ApiError::InvalidCoordinate(e)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/classify", get(classify_handler))
        .route("/api/map", get(map_handler))
        .route("/api/bands", get(bands_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: AppConfig, table: BandTable) -> Result<()> {
    let state = Arc::new(AppState {
        table,
        map: config.map.clone(),
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], config.server.port));
    tracing::info!("Starting server on http://{}", addr);

    let app = router(state, &config.server.static_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn classify_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::warn!("Rejected query: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;
    let (lat, lon) = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Ok(Json(ClassifyResponse::NoSelection {
                message: NO_SELECTION_PROMPT,
            }))
        }
    };

    let coord = Coordinate::new(lat, lon).map_err(|e| {
        tracing::warn!("Rejected coordinate: {}", e);
        e
    })?;
    let record = classify_with(&state.table, coord);
    tracing::debug!(lat, lon, region = %record.region, "classified pin");

    Ok(Json(ClassifyResponse::Located {
        lat,
        lon,
        region: record.region.clone(),
        pin: pin_message(&coord),
        message: region_message(&record),
        data: record,
    }))
}

async fn map_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let map = &state.map;
    Json(json!({
        "center": { "lat": map.center_lat, "lon": map.center_lon },
        "zoom": map.zoom,
        "title": map.title,
    }))
}

async fn bands_handler(State(state): State<Arc<AppState>>) -> Json<BandTable> {
    Json(state.table.clone())
}
