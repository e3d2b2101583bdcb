//! Data models for the `SkySense` backend
//!
//! This module contains the core domain models organized by concern:
//! - Location: resolved location tags and incoming location queries
//! - Upstream: wire shapes of the third-party geocoding and One Call APIs
//! - View: the dashboard's canonical view model

pub mod location;
pub mod upstream;
pub mod view;

// Re-export all public types for convenient access
pub use location::{Location, LocationQuery};
pub use upstream::{CitySuggestion, GeocodingResult, OneCallResponse};
pub use view::{CitySummary, DailyForecast, HourlyForecast, WeatherView};
