//! Proxy gateway
//!
//! Resolves a location, fetches the upstream forecast for it and returns the
//! raw payload tagged with the resolved location. Forecast fields are never
//! transformed here.

use crate::location_resolver::LocationResolver;
use crate::models::{CitySuggestion, Location, LocationQuery, OneCallResponse};
use crate::upstream::OpenWeatherClient;
use crate::{Result, SkySenseError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, instrument};

const SEARCH_LIMIT: u8 = 5;

/// Raw upstream forecast plus the location it was resolved for.
///
/// Serializes as the upstream object with an extra `location` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    #[serde(flatten)]
    pub forecast: Map<String, Value>,
    pub location: Location,
}

impl WeatherResponse {
    #[must_use]
    pub fn new(mut forecast: Map<String, Value>, location: Location) -> Self {
        forecast.remove("location");
        Self { forecast, location }
    }

    /// Decode the typed subset of the payload the dashboard reads
    pub fn decode(&self) -> Result<OneCallResponse> {
        serde_json::from_value(Value::Object(self.forecast.clone())).map_err(|e| {
            error!("Forecast payload for {} is malformed: {}", self.location.name, e);
            SkySenseError::upstream(None, format!("Invalid forecast data received from upstream: {e}"))
        })
    }
}

/// Anything that can answer a location query with a forecast payload
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn resolve_weather(&self, query: &LocationQuery) -> Result<WeatherResponse>;
}

/// In-process gateway backed by the OpenWeather client
#[derive(Debug, Clone)]
pub struct Gateway {
    client: OpenWeatherClient,
    search_min_chars: usize,
}

impl Gateway {
    #[must_use]
    pub fn new(client: OpenWeatherClient, search_min_chars: usize) -> Self {
        Self {
            client,
            search_min_chars,
        }
    }

    /// Resolve coordinates, fetch the forecast and attach the location tag
    #[instrument(skip(self), fields(query = %query))]
    pub async fn resolve_weather(&self, query: &LocationQuery) -> Result<WeatherResponse> {
        let mut location = LocationResolver::resolve_location(&self.client, query).await?;
        info!("Fetching forecast for {} ({})", location.name, location.format_coordinates());

        let forecast = self.client.one_call(location.lat, location.lon).await?;

        if matches!(query, LocationQuery::Coordinates { .. }) {
            LocationResolver::name_coordinates(&self.client, &mut location).await;
        }

        Ok(WeatherResponse::new(forecast, location))
    }

    /// Pass-through city search for the search-as-you-type box
    #[instrument(skip(self))]
    pub async fn search_cities(&self, query: &str) -> Result<Vec<CitySuggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SkySenseError::bad_request("Search query required"));
        }
        if query.chars().count() < self.search_min_chars {
            return Ok(Vec::new());
        }

        let results = self.client.geocode(query, SEARCH_LIMIT).await?;
        Ok(results.into_iter().map(CitySuggestion::from).collect())
    }
}

#[async_trait]
impl ForecastSource for Gateway {
    async fn resolve_weather(&self, query: &LocationQuery) -> Result<WeatherResponse> {
        Gateway::resolve_weather(self, query).await
    }
}
