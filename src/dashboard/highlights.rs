//! Presentation-time values derived from a finished view

use super::derive::{RelativeDirection, TemperatureUnit, UvStatus, WindStatus, time_relative};
use crate::models::WeatherView;
use chrono::{NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Today's highlight cards, formatted in the requested unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    pub unit: TemperatureUnit,
    pub temperature: String,
    pub feels_like: String,
    pub high: String,
    pub low: String,
    pub uv_status: String,
    pub wind_status: String,
    /// e.g. "1h 58m ago"
    pub sunrise_relative: String,
    /// e.g. "In 2h 17m"
    pub sunset_relative: String,
}

impl Highlights {
    /// `now` is the wall-clock time at the view's location
    #[must_use]
    pub fn from_view(view: &WeatherView, unit: TemperatureUnit, now: NaiveTime) -> Self {
        Self {
            unit,
            temperature: unit.format(view.temp),
            feels_like: unit.format(view.feels_like),
            high: unit.format(view.high),
            low: unit.format(view.low),
            uv_status: UvStatus::from_index(view.uv_index as f64).to_string(),
            wind_status: WindStatus::from_kmh(view.wind_speed as f64).to_string(),
            sunrise_relative: time_relative(&view.sunrise, RelativeDirection::Past, now),
            sunset_relative: time_relative(&view.sunset, RelativeDirection::Future, now),
        }
    }
}

/// Current wall-clock time at a location `offset_seconds` east of UTC
#[must_use]
pub fn local_now(offset_seconds: i32) -> NaiveTime {
    (Utc::now().naive_utc() + TimeDelta::seconds(i64::from(offset_seconds))).time()
}
