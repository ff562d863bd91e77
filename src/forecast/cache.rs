//! Caching implementations for forecast types.

use crate::cache::{Cacheable, QueryKey};
use crate::location::LocationQuery;

use super::types::Forecast;
use super::FORECAST_DAYS;

impl Cacheable for Forecast {
  fn entity_type() -> &'static str {
    "forecast"
  }
}

/// Key for a forecast request: the trimmed location as typed plus the day count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForecastQueryKey {
  pub location: String,
  pub days: u32,
}

impl ForecastQueryKey {
  pub fn for_query(query: &LocationQuery) -> Self {
    Self {
      location: query.raw.clone(),
      days: FORECAST_DAYS,
    }
  }
}

impl QueryKey for ForecastQueryKey {
  fn cache_key(&self) -> String {
    format!("{}-{}", self.location, self.days)
  }

  fn description(&self) -> String {
    format!("forecast for {} ({} day)", self.location, self.days)
  }
}
