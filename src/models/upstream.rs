//! OpenWeather response structures
//!
//! Only the fields the dashboard reads are typed here; the gateway itself
//! forwards the raw JSON untouched.

use super::Location;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One Call 3.0 response (metric units, minutely/alerts excluded)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneCallResponse {
    pub lat: f64,
    pub lon: f64,
    /// IANA zone name of the forecast location
    #[serde(default)]
    pub timezone: Option<String>,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone_offset: i32,
    pub current: CurrentConditions,
    #[serde(default)]
    pub hourly: Vec<HourlySample>,
    #[serde(default)]
    pub daily: Vec<DailySample>,
}

/// Current conditions block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation time, unix seconds
    pub dt: i64,
    /// Absent in polar day/night
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
    /// Temperature in Celsius
    pub temp: f64,
    pub feels_like: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    #[serde(default)]
    pub uvi: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// One entry of the hourly series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlySample {
    pub dt: i64,
    pub temp: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Probability of precipitation, 0.0-1.0
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// One entry of the daily series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySample {
    pub dt: i64,
    pub temp: DailyTemperature,
    /// Probability of precipitation, 0.0-1.0
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub min: f64,
    pub max: f64,
}

/// Weather condition descriptor (`weather[0]` is the primary one)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub id: u32,
    /// Condition group, e.g. "Clouds"
    pub main: String,
    #[serde(default)]
    pub description: String,
    /// Icon token, e.g. "04d"
    pub icon: String,
}

/// Geocoding result from the direct and reverse geocoding APIs
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeocodingResult {
    /// Location name
    pub name: String,
    /// Local names in different languages
    #[serde(default)]
    pub local_names: Option<HashMap<String, String>>,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Country code
    #[serde(default)]
    pub country: String,
    /// State (for US locations and some others)
    #[serde(default)]
    pub state: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(geocoding: GeocodingResult) -> Self {
        Location::new(geocoding.name, geocoding.country, geocoding.lat, geocoding.lon)
    }
}

/// City search candidate returned by `/api/search-cities`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl From<GeocodingResult> for CitySuggestion {
    fn from(geocoding: GeocodingResult) -> Self {
        Self {
            name: geocoding.name,
            country: geocoding.country,
            state: geocoding.state,
            lat: geocoding.lat,
            lon: geocoding.lon,
        }
    }
}
