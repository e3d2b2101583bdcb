//! Forecast payloads shared by the dashboard unit tests

use crate::gateway::WeatherResponse;
use crate::models::Location;
use serde_json::{Value, json};

/// 2024-01-15T07:00:00Z, a Monday
pub const BASE_TS: i64 = 1_705_302_000;

/// One Call payload with 48 hourly and 8 daily samples.
///
/// Wind is 5 m/s and precipitation probability 0.42 throughout.
pub fn forecast_payload(temp: f64) -> Value {
    let clouds = json!([{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}]);

    let hourly: Vec<Value> = (0..48)
        .map(|i| {
            json!({
                "dt": BASE_TS + i * 3600,
                "temp": temp,
                "wind_speed": 5.0,
                "pop": 0.42,
                "weather": clouds,
            })
        })
        .collect();

    let daily: Vec<Value> = (0..8)
        .map(|i| {
            json!({
                "dt": BASE_TS + 5 * 3600 + i * 86_400,
                "temp": {"min": 9.3 + i as f64, "max": 17.2 + i as f64, "day": temp},
                "pop": 0.42,
                "weather": clouds,
            })
        })
        .collect();

    json!({
        "lat": 51.5073,
        "lon": -0.1276,
        "timezone": "Europe/London",
        "timezone_offset": 0,
        "current": {
            "dt": BASE_TS,
            "sunrise": BASE_TS + 62 * 60,
            "sunset": BASE_TS + 9 * 3600 + 17 * 60,
            "temp": temp,
            "feels_like": 14.2,
            "humidity": 72,
            "uvi": 2.6,
            "wind_speed": 5.0,
            "weather": clouds,
        },
        "hourly": hourly,
        "daily": daily,
    })
}

pub fn response_from(payload: Value, name: &str, country: &str) -> WeatherResponse {
    let Value::Object(map) = payload else {
        panic!("forecast fixture must be an object");
    };
    WeatherResponse::new(map, Location::new(name, country, 51.5073, -0.1276))
}

pub fn response_for(name: &str, country: &str, temp: f64) -> WeatherResponse {
    response_from(forecast_payload(temp), name, country)
}
