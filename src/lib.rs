//! `SkySense` - weather dashboard backend
//!
//! A proxy gateway in front of the OpenWeather geocoding and One Call APIs,
//! and a view-model normalizer that reduces raw forecasts into the data the
//! dashboard renders.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod upstream;
pub mod web;

// Re-export core types for public API
pub use config::SkySenseConfig;
pub use dashboard::{
    CitySearch, DashboardService, FixedPosition, Geolocator, Highlights, TemperatureUnit,
    Unavailable, ViewTracker,
};
pub use error::SkySenseError;
pub use gateway::{ForecastSource, Gateway, WeatherResponse};
pub use location_resolver::LocationResolver;
pub use models::{CitySuggestion, Location, LocationQuery, WeatherView};
pub use scheduler::ActivityPlan;
pub use upstream::OpenWeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkySenseError>;
