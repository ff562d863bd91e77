//! Serde types matching the forecast backend's `/predict` endpoint.
//!
//! These types are separate from domain types so that a loosely shaped
//! response can be checked step by step before it becomes a `Forecast`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ForecastError;
use super::types::{Forecast, Prediction};

// ============================================================================
// Request
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ApiPredictRequest<'a> {
  pub location: &'a str,
  pub days: u32,
}

// ============================================================================
// Response
// ============================================================================

/// Top-level response envelope. `predictions` is kept as raw JSON so that a
/// missing or non-array value can be told apart from malformed entries.
#[derive(Debug, Deserialize, Default)]
pub struct ApiPredictResponse {
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub predictions: Option<Value>,
  #[serde(default)]
  pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPrediction {
  pub date: String,
  pub sunset_time: String,
  #[serde(default)]
  pub weather_condition: Option<String>,
  pub quality_score: f64,
  pub clouds: f64,
  pub wind_speed: f64,
  #[serde(default)]
  pub temperature: Option<f64>,
}

impl From<ApiPrediction> for Prediction {
  fn from(api: ApiPrediction) -> Self {
    Self {
      date: api.date,
      sunset_time: api.sunset_time,
      weather_condition: api.weather_condition,
      quality_score: api.quality_score,
      clouds: api.clouds,
      wind_speed: api.wind_speed,
      temperature: api.temperature,
    }
  }
}

/// Pull a non-empty `error` string out of an arbitrary JSON body.
pub fn error_message(body: &Value) -> Option<String> {
  body
    .get("error")
    .and_then(Value::as_str)
    .filter(|msg| !msg.is_empty())
    .map(String::from)
}

impl ApiPredictResponse {
  /// Validate the envelope of a successful (2xx) response.
  ///
  /// Checks run in order: error field, predictions shape, emptiness, count.
  /// `fallback_location` is used when the backend omits the resolved name.
  pub fn into_forecast(self, fallback_location: &str) -> Result<Forecast, ForecastError> {
    if let Some(error) = self.error.filter(|e| !e.is_empty()) {
      return Err(ForecastError::Api(error));
    }

    let entries = match self.predictions {
      Some(Value::Array(entries)) => entries,
      Some(other) => {
        return Err(ForecastError::InvalidForecast {
          reason: format!("predictions is not an array: {}", other),
        })
      }
      None => {
        return Err(ForecastError::InvalidForecast {
          reason: "predictions missing".to_string(),
        })
      }
    };

    if entries.is_empty() {
      return Err(ForecastError::NoForecast);
    }
    if entries.len() != 1 {
      return Err(ForecastError::Incomplete {
        count: entries.len(),
      });
    }

    let entry = entries.into_iter().next().unwrap_or(Value::Null);
    let prediction: ApiPrediction =
      serde_json::from_value(entry).map_err(|e| ForecastError::InvalidForecast {
        reason: format!("malformed prediction: {}", e),
      })?;

    Ok(Forecast {
      location: self
        .location
        .unwrap_or_else(|| fallback_location.to_string()),
      prediction: prediction.into(),
    })
  }
}
