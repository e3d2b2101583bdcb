//! Location Resolution Module
//!
//! Turns a [`LocationQuery`] into a [`Location`] tag: city names are geocoded
//! upstream, coordinates pass through with a provisional name that reverse
//! geocoding may later replace.

use crate::models::{Location, LocationQuery};
use crate::upstream::OpenWeatherClient;
use crate::{Result, SkySenseError};
use tracing::{debug, warn};

/// Service for resolving location queries
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a location query into a location tag
    pub async fn resolve_location(
        api_client: &OpenWeatherClient,
        query: &LocationQuery,
    ) -> Result<Location> {
        debug!("Resolving location query: {:?}", query);

        let location = match query {
            LocationQuery::Coordinates { lat, lon } => Location::provisional(*lat, *lon),
            LocationQuery::City(name) => Self::resolve_name(api_client, name).await?,
        };

        debug!(
            "Resolved location: {} at ({}, {})",
            location.name, location.lat, location.lon
        );

        Ok(location)
    }

    /// Resolve a city name via geocoding, keeping only the best match
    async fn resolve_name(api_client: &OpenWeatherClient, name: &str) -> Result<Location> {
        debug!("Geocoding location name: {}", name);

        let geocoding = api_client
            .geocode(name, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SkySenseError::not_found("City not found"))?;

        debug!(
            "Found location: {} ({:.4}, {:.4})",
            geocoding.name, geocoding.lat, geocoding.lon
        );

        Ok(Location::from(geocoding))
    }

    /// Replace the provisional name with the reverse-geocoded place, if any.
    ///
    /// Failures are logged and leave `location` untouched.
    pub async fn name_coordinates(api_client: &OpenWeatherClient, location: &mut Location) {
        match api_client.reverse_geocode(location.lat, location.lon).await {
            Ok(results) => match results.into_iter().next() {
                Some(place) => {
                    debug!("Reverse geocoded {} to {}", location.format_coordinates(), place.name);
                    location.name = place.name;
                    location.country = place.country;
                }
                None => debug!(
                    "No reverse geocoding results for {}, keeping '{}'",
                    location.format_coordinates(),
                    location.name
                ),
            },
            Err(e) => warn!("Reverse geocoding failed: {}", e),
        }
    }
}
