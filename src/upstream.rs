//! OpenWeather API client
//!
//! Thin async wrapper over the direct/reverse geocoding and One Call 3.0
//! endpoints. Every call is a single attempt: no retry, no backoff, no
//! request timeout. Non-2xx responses become [`SkySenseError::Upstream`]
//! carrying the provider's status code and message.

use crate::config::UpstreamConfig;
use crate::models::GeocodingResult;
use crate::{Result, SkySenseError};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

const GEO_DIRECT_PATH: &str = "/geo/1.0/direct";
const GEO_REVERSE_PATH: &str = "/geo/1.0/reverse";
const ONE_CALL_PATH: &str = "/data/3.0/onecall";

/// Error body returned by the provider, e.g. `{"cod": 401, "message": "Invalid API key"}`
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

/// Client for the OpenWeather geocoding and forecast APIs
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    /// Create a new client from upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SkySenseError::config("Upstream API key is missing"))?
            .to_string();

        let client = Client::builder()
            .user_agent(concat!("SkySense/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SkySenseError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Look up places matching a free-form name, best match first
    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}{}?q={}&limit={}",
            self.base_url,
            GEO_DIRECT_PATH,
            urlencoding::encode(query),
            limit
        );

        let results: Vec<GeocodingResult> = self.get_json(&url, "geocoding").await?;

        if results.is_empty() {
            warn!("No geocoding results found for '{}'", query);
        } else {
            debug!(
                "Geocoding results: {:?}",
                results
                    .iter()
                    .map(|r| format!("{} ({:.4}, {:.4})", r.name, r.lat, r.lon))
                    .collect::<Vec<_>>()
            );
        }

        Ok(results)
    }

    /// Name the place at the given coordinates
    #[instrument(skip(self))]
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}{}?lat={}&lon={}&limit=1",
            self.base_url, GEO_REVERSE_PATH, lat, lon
        );
        self.get_json(&url, "reverse geocoding").await
    }

    /// Fetch current, hourly and daily series in metric units.
    ///
    /// The payload is returned as raw JSON so it can be forwarded verbatim.
    #[instrument(skip(self))]
    pub async fn one_call(&self, lat: f64, lon: f64) -> Result<Map<String, Value>> {
        let url = format!(
            "{}{}?lat={}&lon={}&exclude=minutely,alerts&units=metric",
            self.base_url, ONE_CALL_PATH, lat, lon
        );

        match self.get_json::<Value>(&url, "forecast").await? {
            Value::Object(map) => Ok(map),
            other => {
                error!("Forecast response was not a JSON object: {}", other);
                Err(SkySenseError::upstream(
                    None,
                    "Invalid forecast data received from upstream",
                ))
            }
        }
    }

    /// Perform a single GET and decode the JSON body.
    ///
    /// `url` must not contain the API key; it is appended here so it never
    /// reaches the logs.
    #[instrument(skip(self, url), fields(url = %url))]
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let start_time = Instant::now();
        let full_url = format!("{url}&appid={}", urlencoding::encode(&self.api_key));

        // reqwest errors render the request URL, which carries the key
        let response = self.client.get(&full_url).send().await.map_err(|e| {
            let e = e.without_url();
            error!("Network error calling {} API: {}", what, e);
            SkySenseError::upstream(None, format!("Failed to fetch {what} data: {e}"))
        })?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    format!(
                        "{} request failed with status: {} - {}",
                        what,
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown error")
                    )
                });

            warn!("Upstream {} error ({}): {}", what, status.as_u16(), message);
            return Err(SkySenseError::upstream(Some(status.as_u16()), message));
        }

        let parsed = response.json::<T>().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to parse {} response: {}", what, e);
            SkySenseError::upstream(None, format!("Invalid {what} data received from upstream"))
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved {} data in {:.3}s",
            what,
            total_duration.as_secs_f64()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow {} API response detected: {:.3}s",
                what,
                total_duration.as_secs_f64()
            );
        }

        Ok(parsed)
    }
}
