//! Canonical dashboard view model
//!
//! All temperatures are whole degrees Celsius and wind speeds are km/h.
//! Unit toggling happens at presentation time and is never stored here.

use serde::{Deserialize, Serialize};

/// Everything the dashboard renders for one primary location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherView {
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    /// Offset of the location's wall clock from UTC at observation time
    pub utc_offset_seconds: i32,
    /// Local date, e.g. "Monday, Oct 19, 2026"
    pub date: String,
    pub temp: i64,
    pub high: i64,
    pub low: i64,
    pub feels_like: i64,
    /// Condition group, e.g. "Clouds"
    pub condition: String,
    /// Provider icon token, e.g. "04d"
    pub icon: String,
    pub uv_index: i64,
    /// km/h
    pub wind_speed: i64,
    /// Percent
    pub humidity: i64,
    /// Percent, from today's precipitation probability
    pub chance_of_rain: i64,
    /// Local "HH:MM AM/PM"
    pub sunrise: String,
    pub sunset: String,
    /// "{H}h {M}m"
    pub length_of_day: String,
    /// First 12 hourly samples
    pub hourly: Vec<HourlyForecast>,
    /// Daily samples 1..=7; today is never included
    pub daily: Vec<DailyForecast>,
    /// Roster summaries that resolved successfully
    pub other_cities: Vec<CitySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    /// Local hour, e.g. "3 PM" or "3:30 PM"
    pub time: String,
    pub temp: i64,
    pub icon: String,
    pub condition: String,
    /// Percent chance of precipitation
    pub precipitation: i64,
    /// km/h
    pub wind_speed: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Weekday name
    pub day: String,
    /// "max/min"
    pub temp: String,
    pub icon: String,
    pub condition: String,
}

/// Short summary for one roster city
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CitySummary {
    pub name: String,
    pub country: String,
    pub temp: i64,
    pub high: i64,
    pub low: i64,
    pub condition: String,
    pub icon: String,
}
