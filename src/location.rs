//! Location input parsing.

use thiserror::Error;

/// Reasons a location string is rejected. The messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
  #[error("Please enter a location")]
  Empty,

  #[error("Please enter location as \"City, State\" (e.g. \"Boston, MA\")")]
  MissingSeparator,

  #[error("Please enter a valid city and 2-letter state code (e.g. \"Boston, MA\")")]
  InvalidParts,
}

/// A validated "City, ST" location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
  /// Trimmed input exactly as typed; used for the request and the cache key
  pub raw: String,
  pub city: String,
  pub state: String,
}

impl LocationQuery {
  /// Parse and validate a raw location string.
  ///
  /// Only the first two comma-separated parts are looked at, so
  /// `"Boston, MA, USA"` is accepted as Boston / MA.
  pub fn parse(input: &str) -> Result<Self, LocationError> {
    let raw = input.trim();
    if raw.is_empty() {
      return Err(LocationError::Empty);
    }
    if !raw.contains(',') {
      return Err(LocationError::MissingSeparator);
    }

    let mut parts = raw.split(',').map(str::trim);
    let city = parts.next().unwrap_or_default();
    let state = parts.next().unwrap_or_default();

    if city.is_empty() || state.is_empty() || state.chars().count() != 2 {
      return Err(LocationError::InvalidParts);
    }

    Ok(Self {
      raw: raw.to_string(),
      city: city.to_string(),
      state: state.to_string(),
    })
  }

  /// Normalized "City, ST" form.
  pub fn display_name(&self) -> String {
    format!("{}, {}", self.city, self.state)
  }
}
