//! Reduction of raw gateway payloads into the canonical view model

use super::derive::{
    LocalClock, format_length_of_day, ms_to_kmh, probability_to_percent, round_half_away,
};
use crate::gateway::WeatherResponse;
use crate::models::upstream::{DailySample, HourlySample, OneCallResponse, WeatherCondition};
use crate::models::{CitySummary, DailyForecast, HourlyForecast, WeatherView};
use crate::{Result, SkySenseError};

/// Number of hourly samples shown
pub const HOURLY_WINDOW: usize = 12;
/// Number of days shown after today
pub const DAILY_WINDOW: usize = 7;

const MISSING_CLOCK: &str = "--:--";

impl WeatherView {
    /// Build the primary view from a gateway response.
    ///
    /// `other_cities` starts empty; the dashboard service fills it in.
    pub fn from_response(response: &WeatherResponse) -> Result<Self> {
        let forecast = response.decode()?;
        let clock = LocalClock::new(forecast.timezone.as_deref(), forecast.timezone_offset);
        let current = &forecast.current;
        let today = today(&forecast)?;
        let condition = primary_condition(&current.weather, "current conditions")?;

        let (sunrise, sunset, length_of_day) = match (current.sunrise, current.sunset) {
            (Some(rise), Some(set)) => (
                clock.clock(rise),
                clock.clock(set),
                format_length_of_day(set - rise),
            ),
            (rise, set) => (
                rise.map_or_else(|| MISSING_CLOCK.to_string(), |t| clock.clock(t)),
                set.map_or_else(|| MISSING_CLOCK.to_string(), |t| clock.clock(t)),
                format_length_of_day(0),
            ),
        };

        let hourly = forecast
            .hourly
            .iter()
            .take(HOURLY_WINDOW)
            .map(|sample| hourly_entry(sample, &clock))
            .collect::<Result<Vec<_>>>()?;

        let daily = forecast
            .daily
            .iter()
            .skip(1)
            .take(DAILY_WINDOW)
            .map(|sample| daily_entry(sample, &clock))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            city: response.location.name.clone(),
            country: response.location.country.clone(),
            lat: forecast.lat,
            lon: forecast.lon,
            utc_offset_seconds: clock.offset_seconds(current.dt),
            date: clock.long_date(current.dt),
            temp: round_half_away(current.temp),
            high: round_half_away(today.temp.max),
            low: round_half_away(today.temp.min),
            feels_like: round_half_away(current.feels_like),
            condition: condition.main.clone(),
            icon: condition.icon.clone(),
            uv_index: round_half_away(current.uvi),
            wind_speed: ms_to_kmh(current.wind_speed),
            humidity: round_half_away(current.humidity),
            chance_of_rain: probability_to_percent(today.pop),
            sunrise,
            sunset,
            length_of_day,
            hourly,
            daily,
            other_cities: Vec::new(),
        })
    }
}

impl CitySummary {
    /// Summarize a roster city from its gateway response
    pub fn from_response(response: &WeatherResponse) -> Result<Self> {
        let forecast = response.decode()?;
        let today = today(&forecast)?;
        let condition = primary_condition(&forecast.current.weather, "current conditions")?;

        Ok(Self {
            name: response.location.name.clone(),
            country: response.location.country.clone(),
            temp: round_half_away(forecast.current.temp),
            high: round_half_away(today.temp.max),
            low: round_half_away(today.temp.min),
            condition: condition.main.clone(),
            icon: condition.icon.clone(),
        })
    }
}

fn today(forecast: &OneCallResponse) -> Result<&DailySample> {
    forecast
        .daily
        .first()
        .ok_or_else(|| SkySenseError::upstream(None, "Forecast payload has no daily series"))
}

fn primary_condition<'a>(weather: &'a [WeatherCondition], what: &str) -> Result<&'a WeatherCondition> {
    weather
        .first()
        .ok_or_else(|| SkySenseError::upstream(None, format!("No weather condition for {what}")))
}

fn hourly_entry(sample: &HourlySample, clock: &LocalClock) -> Result<HourlyForecast> {
    let condition = primary_condition(&sample.weather, "hourly sample")?;
    Ok(HourlyForecast {
        time: clock.hour(sample.dt),
        temp: round_half_away(sample.temp),
        icon: condition.icon.clone(),
        condition: condition.main.clone(),
        precipitation: probability_to_percent(sample.pop),
        wind_speed: ms_to_kmh(sample.wind_speed),
    })
}

fn daily_entry(sample: &DailySample, clock: &LocalClock) -> Result<DailyForecast> {
    let condition = primary_condition(&sample.weather, "daily sample")?;
    Ok(DailyForecast {
        day: clock.weekday(sample.dt),
        temp: format!(
            "{}/{}",
            round_half_away(sample.temp.max),
            round_half_away(sample.temp.min)
        ),
        icon: condition.icon.clone(),
        condition: condition.main.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures::{forecast_payload, response_for, response_from};
    use serde_json::json;

    #[test]
    fn test_fixture_payload_round_trip() {
        let view = WeatherView::from_response(&response_for("London", "GB", 15.4)).unwrap();

        assert_eq!(view.temp, 15);
        assert_eq!(view.wind_speed, 18);
        assert_eq!(view.chance_of_rain, 42);
        assert_eq!(view.feels_like, 14);
        assert_eq!(view.humidity, 72);
        assert_eq!(view.uv_index, 3);
        assert_eq!(view.high, 17);
        assert_eq!(view.low, 9);
        assert_eq!(view.condition, "Clouds");
        assert_eq!(view.icon, "04d");
        assert_eq!(view.city, "London");
        assert_eq!(view.country, "GB");
        assert!(view.other_cities.is_empty());
    }

    #[test]
    fn test_half_degree_rounds_up() {
        let view = WeatherView::from_response(&response_for("London", "GB", 15.5)).unwrap();
        assert_eq!(view.temp, 16);
    }

    #[test]
    fn test_hourly_window_is_twelve() {
        let view = WeatherView::from_response(&response_for("London", "GB", 15.4)).unwrap();
        assert_eq!(view.hourly.len(), 12);
        // Fixture hours start 2024-01-15T07:00Z, London is UTC+0 in January
        assert_eq!(view.hourly[0].time, "7 AM");
        assert_eq!(view.hourly[5].time, "12 PM");
        assert_eq!(view.hourly[0].wind_speed, 18);
        assert_eq!(view.hourly[0].precipitation, 42);
    }

    #[test]
    fn test_daily_skips_today_and_caps_at_seven() {
        let view = WeatherView::from_response(&response_for("London", "GB", 15.4)).unwrap();
        assert_eq!(view.daily.len(), 7);
        // Fixture day 0 is Monday 2024-01-15
        assert_eq!(view.daily[0].day, "Tuesday");
        assert_eq!(view.daily[6].day, "Monday");
        assert_eq!(view.daily[0].temp, "18/10");
    }

    #[test]
    fn test_short_series_are_not_padded() {
        let mut payload = forecast_payload(15.4);
        let hourly = payload["hourly"].as_array().unwrap()[..3].to_vec();
        let daily = payload["daily"].as_array().unwrap()[..2].to_vec();
        payload["hourly"] = json!(hourly);
        payload["daily"] = json!(daily);
        let response = response_from(payload, "London", "GB");

        let view = WeatherView::from_response(&response).unwrap();
        assert_eq!(view.hourly.len(), 3);
        assert_eq!(view.daily.len(), 1);
    }

    #[test]
    fn test_sun_cycle_formatting() {
        let view = WeatherView::from_response(&response_for("London", "GB", 15.4)).unwrap();
        assert_eq!(view.sunrise, "08:02 AM");
        assert_eq!(view.sunset, "04:17 PM");
        assert_eq!(view.length_of_day, "8h 15m");
        assert_eq!(view.date, "Monday, Jan 15, 2024");
        assert_eq!(view.utc_offset_seconds, 0);
    }

    #[test]
    fn test_missing_sun_times() {
        let mut payload = forecast_payload(15.4);
        payload["current"]
            .as_object_mut()
            .unwrap()
            .remove("sunrise");
        let response = response_from(payload, "Tromsø", "NO");

        let view = WeatherView::from_response(&response).unwrap();
        assert_eq!(view.sunrise, "--:--");
        assert_eq!(view.sunset, "04:17 PM");
        assert_eq!(view.length_of_day, "0h 0m");
    }

    #[test]
    fn test_missing_daily_series_is_an_error() {
        let mut payload = forecast_payload(15.4);
        payload["daily"] = json!([]);
        let response = response_from(payload, "London", "GB");

        let err = WeatherView::from_response(&response).unwrap_err();
        assert!(matches!(err, SkySenseError::Upstream { .. }));
        assert!(CitySummary::from_response(&response).is_err());
    }

    #[test]
    fn test_city_summary() {
        let summary = CitySummary::from_response(&response_for("Dubai", "AE", 29.6)).unwrap();
        assert_eq!(summary.name, "Dubai");
        assert_eq!(summary.country, "AE");
        assert_eq!(summary.temp, 30);
        assert_eq!(summary.high, 17);
        assert_eq!(summary.low, 9);
        assert_eq!(summary.icon, "04d");
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = WeatherView::from_response(&response_for("London", "GB", 15.4)).unwrap();
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["chanceOfRain"], 42);
        assert_eq!(value["lengthOfDay"], "8h 15m");
        assert!(value["otherCities"].is_array());
        assert_eq!(value["hourly"][0]["windSpeed"], 18);
    }
}
