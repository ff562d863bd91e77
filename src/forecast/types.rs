//! Domain types for sunset forecasts.

use serde::{Deserialize, Serialize};

/// One day's sunset forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
  pub date: String,
  /// ISO 8601 timestamp; parsed when the view is built
  pub sunset_time: String,
  pub weather_condition: Option<String>,
  /// 0-10, higher is better
  pub quality_score: f64,
  /// Cloud cover percentage
  pub clouds: f64,
  /// Meters per second
  pub wind_speed: f64,
  /// Degrees Celsius
  pub temperature: Option<f64>,
}

impl Prediction {
  pub fn condition(&self) -> WeatherCondition {
    WeatherCondition::from_label(self.weather_condition.as_deref())
  }
}

/// A validated single-day response from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
  /// Resolved location name as reported by the backend
  pub location: String,
  pub prediction: Prediction,
}

/// Weather condition groups the backend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
  Clear,
  Clouds,
  Rain,
  Snow,
  Thunderstorm,
  Mist,
  /// Anything unrecognized, or no condition at all
  Other,
}

impl WeatherCondition {
  /// Map a backend label (e.g. "Clouds") to a condition. Matching is exact.
  pub fn from_label(label: Option<&str>) -> Self {
    match label {
      Some("Clear") => Self::Clear,
      Some("Clouds") => Self::Clouds,
      Some("Rain") => Self::Rain,
      Some("Snow") => Self::Snow,
      Some("Thunderstorm") => Self::Thunderstorm,
      Some("Mist") => Self::Mist,
      _ => Self::Other,
    }
  }
}
