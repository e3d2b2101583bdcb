mod error;

pub use error::ApiError;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    Result, SkySenseError, VERSION,
    config::SkySenseConfig,
    dashboard::{
        DashboardService, FixedPosition, Geolocator, Highlights, TemperatureUnit, Unavailable,
        local_now,
    },
    gateway::{Gateway, WeatherResponse},
    models::{CitySuggestion, LocationQuery, WeatherView},
    scheduler::ActivityPlan,
    upstream::OpenWeatherClient,
};

/// Shared handler state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>, dashboard: DashboardService) -> Self {
        Self { gateway, dashboard }
    }

    /// Wire the gateway and dashboard from configuration
    pub fn from_config(config: &SkySenseConfig) -> Result<Self> {
        let client = OpenWeatherClient::new(&config.upstream)?;
        let gateway = Arc::new(Gateway::new(client, config.dashboard.search_min_chars));
        let dashboard = DashboardService::new(gateway.clone(), &config.dashboard);
        Ok(Self::new(gateway, dashboard))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Always true here. A failed build answers with an error status and an
    /// `{"error"}` body, so stale views are only tracked client side by
    /// [`ViewTracker`](crate::dashboard::ViewTracker).
    pub is_live: bool,
    pub view: WeatherView,
    pub highlights: Highlights,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather-data", get(get_weather_data))
        .route("/search-cities", get(search_cities))
        .route("/dashboard", get(get_dashboard))
        .route("/schedule", get(get_schedule))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

async fn get_weather_data(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> Result<Json<WeatherResponse>> {
    let query = LocationQuery::from_params(
        params.city.as_deref(),
        params.lat.as_deref(),
        params.lon.as_deref(),
    )?;
    let response = state.gateway.resolve_weather(&query).await?;
    Ok(Json(response))
}

async fn search_cities(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CitySuggestion>>> {
    let results = state
        .gateway
        .search_cities(params.q.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(results))
}

async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardResponse>> {
    let unit = params
        .unit
        .as_deref()
        .map(str::parse::<TemperatureUnit>)
        .transpose()
        .map_err(SkySenseError::bad_request)?
        .unwrap_or_default();
    let geolocator = device_position(params.lat.as_deref(), params.lon.as_deref())?;

    let view = state
        .dashboard
        .build_view(params.city.as_deref(), geolocator.as_ref())
        .await?;
    let highlights = Highlights::from_view(&view, unit, local_now(view.utc_offset_seconds));

    Ok(Json(DashboardResponse {
        is_live: true,
        view,
        highlights,
    }))
}

async fn get_schedule(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> Result<Json<ActivityPlan>> {
    let geolocator = device_position(params.lat.as_deref(), params.lon.as_deref())?;
    let view = state
        .dashboard
        .build_primary(params.city.as_deref(), geolocator.as_ref())
        .await?;
    Ok(Json(ActivityPlan::from_view(&view)))
}

/// Client-reported position, if both coordinates were sent
fn device_position(lat: Option<&str>, lon: Option<&str>) -> Result<Box<dyn Geolocator>> {
    let present = |v: Option<&str>| v.is_some_and(|s| !s.trim().is_empty());
    if !(present(lat) && present(lon)) {
        return Ok(Box::new(Unavailable));
    }

    match LocationQuery::from_params(None, lat, lon)? {
        LocationQuery::Coordinates { lat, lon } => Ok(Box::new(FixedPosition { lat, lon })),
        LocationQuery::City(_) => Ok(Box::new(Unavailable)),
    }
}
