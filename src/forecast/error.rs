//! Forecast request failures.

use thiserror::Error;

use crate::cache::CacheError;

/// Everything that can go wrong between submitting a location and having a
/// forecast to render. `Display` is the message shown to the user.
#[derive(Error, Debug)]
pub enum ForecastError {
  #[error("Unable to reach the forecast server. Please try again.")]
  Transport(#[source] reqwest::Error),

  #[error("Invalid response from server. Please try again.")]
  InvalidResponse(#[source] serde_json::Error),

  #[error("{}", server_message(.status, .message))]
  Server { status: u16, message: Option<String> },

  #[error("{0}")]
  Api(String),

  #[error("Invalid forecast data received")]
  InvalidForecast { reason: String },

  #[error("No forecast data available for this location")]
  NoForecast,

  #[error("Incomplete forecast data received")]
  Incomplete { count: usize },

  #[error("Local cache error")]
  Cache(#[from] CacheError),
}

fn server_message(status: &u16, message: &Option<String>) -> String {
  match message {
    Some(message) => message.clone(),
    None => format!("Server error: {}", status),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_server_error_prefers_server_message() {
    let err = ForecastError::Server {
      status: 404,
      message: Some("Location not found. Please try a different location.".to_string()),
    };
    assert_eq!(
      err.to_string(),
      "Location not found. Please try a different location."
    );
  }

  #[test]
  fn test_server_error_generic_message() {
    let err = ForecastError::Server {
      status: 502,
      message: None,
    };
    assert_eq!(err.to_string(), "Server error: 502");
  }

  #[test]
  fn test_distinct_shape_messages() {
    assert_eq!(
      ForecastError::NoForecast.to_string(),
      "No forecast data available for this location"
    );
    assert_eq!(
      ForecastError::Incomplete { count: 2 }.to_string(),
      "Incomplete forecast data received"
    );
    assert_eq!(
      ForecastError::InvalidForecast {
        reason: "missing predictions".to_string()
      }
      .to_string(),
      "Invalid forecast data received"
    );
  }
}
