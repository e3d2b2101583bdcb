//! Dashboard view building
//!
//! Resolves the primary location (explicit city, device position, or the
//! default city), reduces its forecast into a [`WeatherView`], and fans out
//! over the city roster. Only a primary failure fails the build; roster
//! cities that fail are dropped.

use crate::config::DashboardConfig;
use crate::gateway::ForecastSource;
use crate::models::{CitySummary, LocationQuery, WeatherView};
use crate::{Result, SkySenseError};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Source of the device's current position
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Latitude and longitude in decimal degrees
    async fn current_position(&self) -> Result<(f64, f64)>;
}

/// No device position available
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl Geolocator for Unavailable {
    async fn current_position(&self) -> Result<(f64, f64)> {
        Err(SkySenseError::geolocation("no device position supplied"))
    }
}

/// Position reported by the client
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition {
    pub lat: f64,
    pub lon: f64,
}

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<(f64, f64)> {
        Ok((self.lat, self.lon))
    }
}

/// Builds dashboard views on top of a forecast source
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn ForecastSource>,
    default_city: String,
    roster: Vec<String>,
    geolocation_timeout: Duration,
}

impl DashboardService {
    #[must_use]
    pub fn new(source: Arc<dyn ForecastSource>, config: &DashboardConfig) -> Self {
        Self {
            source,
            default_city: config.default_city.clone(),
            roster: config
                .roster
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            geolocation_timeout: Duration::from_millis(config.geolocation_timeout_ms),
        }
    }

    /// Pick the primary location.
    ///
    /// An explicit city always wins. Otherwise the device position is tried
    /// within the geolocation timeout, then the default city. Never fails.
    pub async fn resolve_primary(
        &self,
        selection: Option<&str>,
        geolocator: &dyn Geolocator,
    ) -> LocationQuery {
        if let Some(city) = selection.map(str::trim).filter(|c| !c.is_empty()) {
            return LocationQuery::city(city);
        }

        match tokio::time::timeout(self.geolocation_timeout, geolocator.current_position()).await {
            Ok(Ok((lat, lon))) => {
                debug!("Using device position ({:.4}, {:.4})", lat, lon);
                LocationQuery::Coordinates { lat, lon }
            }
            Ok(Err(e)) => {
                warn!("Geolocation failed, using default city ({}): {}", self.default_city, e);
                LocationQuery::city(&self.default_city)
            }
            Err(_) => {
                warn!(
                    "Geolocation timed out after {}ms, using default city ({})",
                    self.geolocation_timeout.as_millis(),
                    self.default_city
                );
                LocationQuery::city(&self.default_city)
            }
        }
    }

    /// Primary view only, without the roster
    #[instrument(skip(self, geolocator))]
    pub async fn build_primary(
        &self,
        selection: Option<&str>,
        geolocator: &dyn Geolocator,
    ) -> Result<WeatherView> {
        let query = self.resolve_primary(selection, geolocator).await;
        let response = self.source.resolve_weather(&query).await?;
        WeatherView::from_response(&response)
    }

    /// Full dashboard view including roster summaries
    #[instrument(skip(self, geolocator))]
    pub async fn build_view(
        &self,
        selection: Option<&str>,
        geolocator: &dyn Geolocator,
    ) -> Result<WeatherView> {
        let mut view = self.build_primary(selection, geolocator).await?;
        view.other_cities = self.fetch_roster().await;

        info!(
            "Built view for {} with {}/{} roster cities",
            view.city,
            view.other_cities.len(),
            self.roster.len()
        );
        Ok(view)
    }

    /// Summaries for every roster city that resolves; failures are dropped
    pub async fn fetch_roster(&self) -> Vec<CitySummary> {
        let summaries = join_all(self.roster.iter().map(|name| async move {
            let query = LocationQuery::city(name.as_str());
            let summary = match self.source.resolve_weather(&query).await {
                Ok(response) => CitySummary::from_response(&response),
                Err(e) => Err(e),
            };
            match summary {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!("Dropping roster city {}: {}", name, e);
                    None
                }
            }
        }))
        .await;

        let summaries: Vec<CitySummary> = summaries.into_iter().flatten().collect();
        if summaries.len() < self.roster.len() {
            warn!(
                "{} of {} roster cities failed",
                self.roster.len() - summaries.len(),
                self.roster.len()
            );
        }
        summaries
    }
}
