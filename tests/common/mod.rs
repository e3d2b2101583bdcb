//! Shared helpers for the wiremock-backed integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use skysense::api::AppState;
use skysense::{SkySenseConfig, web};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key-123";

/// 2024-01-15T07:00:00Z
pub const BASE_TS: i64 = 1_705_302_000;

pub fn test_config(server: &MockServer) -> SkySenseConfig {
    let mut config = SkySenseConfig::default();
    config.upstream.api_key = Some(API_KEY.to_string());
    config.upstream.base_url = server.uri();
    config
}

pub fn test_app(config: &SkySenseConfig) -> Router {
    let state = AppState::from_config(config).unwrap();
    web::app(state, &config.server).unwrap()
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn geocode_hit(name: &str, country: &str, lat: f64, lon: f64) -> Value {
    json!({
        "name": name,
        "local_names": {"en": name},
        "lat": lat,
        "lon": lon,
        "country": country,
    })
}

/// One Call payload: 48 hourly samples and 8 daily samples at a constant temperature
pub fn forecast_payload(lat: f64, lon: f64, temp: f64) -> Value {
    let clear = json!([{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}]);

    let hourly: Vec<Value> = (0..48)
        .map(|i| {
            json!({
                "dt": BASE_TS + i * 3600,
                "temp": temp,
                "wind_speed": 3.0,
                "pop": 0.1,
                "weather": clear,
            })
        })
        .collect();

    let daily: Vec<Value> = (0..8)
        .map(|i| {
            json!({
                "dt": BASE_TS + 5 * 3600 + i * 86_400,
                "temp": {"min": temp - 6.0, "max": temp + 4.0},
                "pop": 0.1,
                "weather": clear,
            })
        })
        .collect();

    json!({
        "lat": lat,
        "lon": lon,
        "timezone": "Europe/London",
        "timezone_offset": 0,
        "current": {
            "dt": BASE_TS,
            "sunrise": BASE_TS + 62 * 60,
            "sunset": BASE_TS + 9 * 3600 + 17 * 60,
            "temp": temp,
            "feels_like": temp - 1.0,
            "humidity": 55,
            "uvi": 1.2,
            "wind_speed": 3.0,
            "weather": clear,
        },
        "hourly": hourly,
        "daily": daily,
    })
}

/// Serve geocoding and forecast for one city
pub async fn mount_city(server: &MockServer, name: &str, country: &str, lat: f64, lon: f64, temp: f64) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([geocode_hit(
            name, country, lat, lon
        )])))
        .mount(server)
        .await;

    mount_forecast(server, lat, lon, temp).await;
}

pub async fn mount_forecast(server: &MockServer, lat: f64, lon: f64, temp: f64) {
    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .and(query_param("lat", lat.to_string()))
        .and(query_param("lon", lon.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(lat, lon, temp)))
        .mount(server)
        .await;
}

/// Geocoding for `name` fails with a server error
pub async fn mount_failing_city(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", name))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"cod": 500, "message": "Internal error"})),
        )
        .mount(server)
        .await;
}

/// The default roster, every city resolvable
pub async fn mount_roster(server: &MockServer, failing: &[&str]) {
    let roster = [
        ("New York", "US", 40.71, -74.01, 3.2),
        ("Dubai", "AE", 25.2, 55.27, 29.6),
        ("Tokyo", "JP", 35.68, 139.69, 8.1),
        ("London", "GB", 51.51, -0.13, 7.4),
        ("Ibadan", "NG", 7.38, 3.93, 31.0),
        ("Lagos", "NG", 6.45, 3.39, 30.5),
    ];

    for (name, country, lat, lon, temp) in roster {
        if failing.contains(&name) {
            mount_failing_city(server, name).await;
        } else {
            mount_city(server, name, country, lat, lon, temp).await;
        }
    }
}
