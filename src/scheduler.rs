//! Activity planning on top of a dashboard view

use crate::models::{HourlyForecast, WeatherView};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hours covered by the recommendation list
pub const RECOMMENDATION_HOURS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    Ideal,
    Poor,
    Perfect,
    Avoid,
    Great,
    Cozy,
    Safe,
    #[serde(rename = "Use SPF")]
    UseSpf,
}

impl ActivityStatus {
    #[must_use]
    pub fn is_favourable(self) -> bool {
        matches!(
            self,
            ActivityStatus::Ideal | ActivityStatus::Perfect | ActivityStatus::Great
        )
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityStatus::Ideal => "Ideal",
            ActivityStatus::Poor => "Poor",
            ActivityStatus::Perfect => "Perfect",
            ActivityStatus::Avoid => "Avoid",
            ActivityStatus::Great => "Great",
            ActivityStatus::Cozy => "Cozy",
            ActivityStatus::Safe => "Safe",
            ActivityStatus::UseSpf => "Use SPF",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    /// The view value the status was judged on, as displayed
    pub metric: String,
    pub ideal: String,
    pub status: ActivityStatus,
    pub favourable: bool,
}

impl Activity {
    fn new(name: &str, metric: String, ideal: &str, status: ActivityStatus) -> Self {
        Self {
            name: name.to_string(),
            metric,
            ideal: ideal.to_string(),
            status,
            favourable: status.is_favourable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRecommendation {
    pub time: String,
    pub is_good: bool,
    pub message: String,
}

impl From<&HourlyForecast> for HourlyRecommendation {
    fn from(hour: &HourlyForecast) -> Self {
        let is_good = hour.precipitation < 30 && hour.temp > 10;
        let message = if is_good {
            "Perfect for outdoor plans"
        } else {
            "Stay indoors, rain or cold expected"
        };
        Self {
            time: hour.time.clone(),
            is_good,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPlan {
    pub activities: Vec<Activity>,
    pub hourly: Vec<HourlyRecommendation>,
}

impl ActivityPlan {
    #[must_use]
    pub fn from_view(view: &WeatherView) -> Self {
        let workout = if view.temp > 15 && view.temp < 28 {
            ActivityStatus::Ideal
        } else {
            ActivityStatus::Poor
        };
        let car_wash = if view.chance_of_rain < 20 {
            ActivityStatus::Perfect
        } else {
            ActivityStatus::Avoid
        };
        let coffee = if view.condition == "Clear" || view.condition == "Clouds" {
            ActivityStatus::Great
        } else {
            ActivityStatus::Cozy
        };
        let beach = if view.uv_index < 5 {
            ActivityStatus::Safe
        } else {
            ActivityStatus::UseSpf
        };

        let activities = vec![
            Activity::new("Outdoor Workout", format!("{}°C", view.temp), "15-25°C", workout),
            Activity::new("Car Wash", format!("{}%", view.chance_of_rain), "<20%", car_wash),
            Activity::new("Coffee Break", view.condition.clone(), "Cloudy/Clear", coffee),
            Activity::new("Beach Day", view.uv_index.to_string(), "Low UV", beach),
        ];

        let hourly = view
            .hourly
            .iter()
            .take(RECOMMENDATION_HOURS)
            .map(HourlyRecommendation::from)
            .collect();

        Self { activities, hourly }
    }
}
