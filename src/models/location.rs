//! Location tag and location query models

use crate::{Result, SkySenseError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name given to caller-supplied coordinates until reverse geocoding names them
pub const PROVISIONAL_NAME: &str = "Your Location";

/// Resolved location attached to every gateway response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Location name (city, region, etc.)
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2), empty when unknown
    #[serde(default)]
    pub country: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, country: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            lat,
            lon,
        }
    }

    /// Location for bare coordinates before reverse geocoding
    #[must_use]
    pub fn provisional(lat: f64, lon: f64) -> Self {
        Self::new(PROVISIONAL_NAME, "", lat, lon)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// What the caller asked the gateway to resolve
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-form city name, geocoded upstream
    City(String),
    /// Caller-supplied coordinates
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    /// Query for a city name
    #[must_use]
    pub fn city(name: impl Into<String>) -> Self {
        Self::City(name.into())
    }

    /// Build a query from raw `city`/`lat`/`lon` request parameters.
    ///
    /// Coordinates win when both are present. A blank city counts as absent.
    pub fn from_params(city: Option<&str>, lat: Option<&str>, lon: Option<&str>) -> Result<Self> {
        let lat = lat.map(str::trim).filter(|s| !s.is_empty());
        let lon = lon.map(str::trim).filter(|s| !s.is_empty());

        if let (Some(lat), Some(lon)) = (lat, lon) {
            let (lat, lon) = Self::parse_coordinates(lat, lon)?;
            return Ok(Self::Coordinates { lat, lon });
        }

        match city.map(str::trim).filter(|s| !s.is_empty()) {
            Some(city) => Ok(Self::City(city.to_string())),
            None => Err(SkySenseError::bad_request("City or Coordinates required")),
        }
    }

    fn parse_coordinates(lat: &str, lon: &str) -> Result<(f64, f64)> {
        let lat = lat
            .parse::<f64>()
            .map_err(|_| SkySenseError::bad_request(format!("Invalid latitude: {lat}")))?;
        let lon = lon
            .parse::<f64>()
            .map_err(|_| SkySenseError::bad_request(format!("Invalid longitude: {lon}")))?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(SkySenseError::bad_request(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            )));
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(SkySenseError::bad_request(format!(
                "Longitude must be between -180 and 180, got: {lon}"
            )));
        }

        Ok((lat, lon))
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::City(name) => write!(f, "{name}"),
            LocationQuery::Coordinates { lat, lon } => write!(f, "{lat:.4}, {lon:.4}"),
        }
    }
}
