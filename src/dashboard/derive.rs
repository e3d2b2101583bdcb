//! Derived fields: unit conversions, status classifications and
//! human-readable time formatting.
//!
//! Rounding is always half away from zero (`f64::round`), never truncation.

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Round an upstream float to a displayed integer
#[must_use]
pub fn round_half_away(value: f64) -> i64 {
    value.round() as i64
}

/// Convert m/s to whole km/h
#[must_use]
pub fn ms_to_kmh(speed_ms: f64) -> i64 {
    round_half_away(speed_ms * 3.6)
}

/// Convert a 0.0-1.0 probability to a whole percentage
#[must_use]
pub fn probability_to_percent(pop: f64) -> i64 {
    round_half_away(pop * 100.0)
}

#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> i64 {
    round_half_away(celsius * 9.0 / 5.0 + 32.0)
}

/// UV index classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UvStatus {
    /// 0-2
    Low,
    /// 3-5
    Moderate,
    /// 6-7
    High,
    /// 8-10
    VeryHigh,
    /// 11+
    Extreme,
}

impl UvStatus {
    #[must_use]
    pub fn from_index(uv: f64) -> Self {
        match uv {
            u if u <= 2.0 => UvStatus::Low,
            u if u <= 5.0 => UvStatus::Moderate,
            u if u <= 7.0 => UvStatus::High,
            u if u <= 10.0 => UvStatus::VeryHigh,
            _ => UvStatus::Extreme,
        }
    }
}

/// Wind speed classification, km/h
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindStatus {
    /// < 1
    Calm,
    /// 1-11
    Gentle,
    /// 12-38
    Breeze,
    /// 39-61
    Strong,
    /// 62+
    Storm,
}

impl WindStatus {
    #[must_use]
    pub fn from_kmh(speed_kmh: f64) -> Self {
        match speed_kmh {
            s if s < 1.0 => WindStatus::Calm,
            s if s < 12.0 => WindStatus::Gentle,
            s if s < 39.0 => WindStatus::Breeze,
            s if s < 62.0 => WindStatus::Strong,
            _ => WindStatus::Storm,
        }
    }
}

/// Display unit for temperatures; applied at render time only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a whole-degree Celsius value for display
    #[must_use]
    pub fn convert(self, celsius: i64) -> i64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius as f64),
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// "59°F"
    #[must_use]
    pub fn format(self, celsius: i64) -> String {
        format!("{}°{}", self.convert(celsius), self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" | "CELSIUS" => Ok(TemperatureUnit::Celsius),
            "F" | "FAHRENHEIT" => Ok(TemperatureUnit::Fahrenheit),
            other => Err(format!("Unknown temperature unit '{other}'")),
        }
    }
}

/// "{H}h {M}m" for a span in seconds; negative spans read as zero
#[must_use]
pub fn format_length_of_day(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

/// Whether a time-of-day label lies behind or ahead of now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDirection {
    Past,
    Future,
}

/// Render "HH:MM AM/PM" as a distance from `now`.
///
/// Produces "{h}h {m}m ago" or "In {h}h {m}m". Anything unparseable yields
/// "Earlier today" / "Later today".
#[must_use]
pub fn time_relative(label: &str, direction: RelativeDirection, now: NaiveTime) -> String {
    match parse_clock_label(label) {
        Some(target) => {
            let diff_ms = (target - now).num_milliseconds().abs();
            let hours = diff_ms / 3_600_000;
            let minutes = (diff_ms % 3_600_000) / 60_000;
            match direction {
                RelativeDirection::Past => format!("{hours}h {minutes}m ago"),
                RelativeDirection::Future => format!("In {hours}h {minutes}m"),
            }
        }
        None => match direction {
            RelativeDirection::Past => "Earlier today".to_string(),
            RelativeDirection::Future => "Later today".to_string(),
        },
    }
}

fn parse_clock_label(label: &str) -> Option<NaiveTime> {
    let mut parts = label.split_whitespace();
    let time = parts.next()?;
    let modifier = parts.next().map(str::to_ascii_uppercase);
    if parts.next().is_some() {
        return None;
    }

    let (hours, minutes) = time.split_once(':')?;
    let mut hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;

    match modifier.as_deref() {
        Some("AM" | "PM") if hours == 0 || hours > 12 => return None,
        Some("PM") if hours < 12 => hours += 12,
        Some("AM") if hours == 12 => hours = 0,
        Some("AM" | "PM") | None => {}
        Some(_) => return None,
    }

    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Wall clock of the forecast location
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalClock {
    Zone(Tz),
    Offset(FixedOffset),
}

impl LocalClock {
    /// Prefer the IANA zone name, then the raw offset, then UTC
    #[must_use]
    pub fn new(timezone: Option<&str>, offset_seconds: i32) -> Self {
        if let Some(tz) = timezone.and_then(|name| name.parse::<Tz>().ok()) {
            return LocalClock::Zone(tz);
        }
        FixedOffset::east_opt(offset_seconds)
            .map(LocalClock::Offset)
            .unwrap_or(LocalClock::Zone(Tz::UTC))
    }

    /// Local wall time for a unix timestamp
    #[must_use]
    pub fn local(&self, timestamp: i64) -> Option<NaiveDateTime> {
        let utc = DateTime::from_timestamp(timestamp, 0)?;
        Some(match self {
            LocalClock::Zone(tz) => utc.with_timezone(tz).naive_local(),
            LocalClock::Offset(offset) => utc.with_timezone(offset).naive_local(),
        })
    }

    /// Seconds east of UTC at the given instant
    #[must_use]
    pub fn offset_seconds(&self, timestamp: i64) -> i32 {
        match (DateTime::from_timestamp(timestamp, 0), self.local(timestamp)) {
            (Some(utc), Some(local)) => (local - utc.naive_utc()).num_seconds() as i32,
            _ => 0,
        }
    }

    /// "06:42 AM"
    #[must_use]
    pub fn clock(&self, timestamp: i64) -> String {
        self.format(timestamp, "%I:%M %p")
    }

    /// "3 PM", or "3:30 PM" off the hour
    #[must_use]
    pub fn hour(&self, timestamp: i64) -> String {
        self.format(timestamp, "%-I:%M %p").replacen(":00", "", 1)
    }

    /// "Tuesday"
    #[must_use]
    pub fn weekday(&self, timestamp: i64) -> String {
        self.format(timestamp, "%A")
    }

    /// "Monday, Oct 19, 2026"
    #[must_use]
    pub fn long_date(&self, timestamp: i64) -> String {
        self.format(timestamp, "%A, %b %-d, %Y")
    }

    fn format(&self, timestamp: i64, pattern: &str) -> String {
        self.local(timestamp)
            .map(|dt| dt.format(pattern).to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for UvStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UvStatus::Low => write!(f, "Low"),
            UvStatus::Moderate => write!(f, "Moderate"),
            UvStatus::High => write!(f, "High"),
            UvStatus::VeryHigh => write!(f, "Very High"),
            UvStatus::Extreme => write!(f, "Extreme"),
        }
    }
}

impl fmt::Display for WindStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindStatus::Calm => write!(f, "Calm"),
            WindStatus::Gentle => write!(f, "Gentle"),
            WindStatus::Breeze => write!(f, "Breeze"),
            WindStatus::Strong => write!(f, "Strong"),
            WindStatus::Storm => write!(f, "Storm"),
        }
    }
}
