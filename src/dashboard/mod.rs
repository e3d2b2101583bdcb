//! View-model normalizer for the dashboard
//!
//! Turns raw gateway payloads into a [`WeatherView`](crate::models::WeatherView)
//! and keeps the client-side refresh and search state consistent.

pub mod derive;
pub mod highlights;
pub mod normalize;
pub mod search;
pub mod service;
pub mod tracker;

#[cfg(test)]
mod fixtures;

pub use derive::{
    LocalClock, RelativeDirection, TemperatureUnit, UvStatus, WindStatus, time_relative,
};
pub use highlights::{Highlights, local_now};
pub use search::{CityLookup, CitySearch};
pub use service::{DashboardService, FixedPosition, Geolocator, Unavailable};
pub use tracker::{DashboardState, Ticket, ViewTracker};
