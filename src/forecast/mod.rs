//! Sunset forecast backend: wire types, HTTP client and session caching.

pub mod api_types;
pub mod cache;
pub mod cached_client;
pub mod client;
pub mod error;
pub mod types;

pub use cached_client::CachedForecastClient;
pub use client::ForecastClient;
pub use types::{Forecast, WeatherCondition};

/// Number of days requested per forecast. The backend is only ever asked for one.
pub const FORECAST_DAYS: u32 = 1;
