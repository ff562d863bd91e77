//! Cached forecast client that wraps ForecastClient with a session cache.

use color_eyre::Result;

use crate::cache::{CacheLayer, CacheResult, MemoryStorage};
use crate::config::Config;
use crate::location::LocationQuery;

use super::cache::ForecastQueryKey;
use super::client::ForecastClient;
use super::error::ForecastError;
use super::types::Forecast;

/// Forecast client with transparent caching.
///
/// Successful forecasts are kept for the rest of the session and served for
/// any later request with the same key. Failures are never cached.
#[derive(Clone)]
pub struct CachedForecastClient {
  inner: ForecastClient,
  cache: CacheLayer<MemoryStorage>,
}

impl CachedForecastClient {
  pub fn new(config: &Config) -> Result<Self> {
    Ok(Self::with_client(ForecastClient::new(config)?))
  }

  pub fn with_client(inner: ForecastClient) -> Self {
    Self {
      inner,
      cache: CacheLayer::new(MemoryStorage::new()),
    }
  }

  /// Look up a cached forecast without touching the network.
  ///
  /// Storage errors are logged and treated as a miss.
  pub fn cached(&self, query: &LocationQuery) -> Option<Forecast> {
    let key = ForecastQueryKey::for_query(query);
    match self.cache.peek::<Forecast, _>(&key) {
      Ok(hit) => hit.map(|result| result.data),
      Err(e) => {
        tracing::warn!(error = %e, "forecast cache lookup failed");
        None
      }
    }
  }

  /// Get a forecast, from cache when available.
  pub async fn predict(
    &self,
    query: &LocationQuery,
  ) -> Result<CacheResult<Forecast>, ForecastError> {
    let key = ForecastQueryKey::for_query(query);
    self
      .cache
      .fetch(&key, || {
        let inner = self.inner.clone();
        let query = query.clone();
        async move { inner.predict(&query).await }
      })
      .await
  }

  /// Number of cached forecasts.
  pub fn cached_count(&self) -> usize {
    self.cache.len().unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use url::Url;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn client_for(server: &MockServer) -> CachedForecastClient {
    let base = Url::parse(&server.uri()).unwrap();
    CachedForecastClient::with_client(ForecastClient::with_base_url(&base).unwrap())
  }

  fn success_body() -> serde_json::Value {
    json!({
      "location": "Boston, Massachusetts, United States",
      "predictions": [{
        "date": "2024-06-01",
        "sunset_time": "2024-06-01T20:15:00-04:00",
        "weather_condition": "Clear",
        "quality_score": 8,
        "clouds": 5,
        "wind_speed": 1.5
      }]
    })
  }

  #[tokio::test]
  async fn test_repeat_request_hits_cache() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
      .expect(1)
      .mount(&server)
      .await;

    let client = client_for(&server);
    let query = LocationQuery::parse("Boston, MA").unwrap();

    let first = client.predict(&query).await.unwrap();
    assert!(!first.is_cached());

    let second = client.predict(&query).await.unwrap();
    assert!(second.is_cached());
    assert_eq!(first.data, second.data);

    assert_eq!(client.cached(&query), Some(first.data));
    assert_eq!(client.cached_count(), 1);
  }

  #[tokio::test]
  async fn test_different_spelling_is_a_separate_entry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
      .expect(2)
      .mount(&server)
      .await;

    let client = client_for(&server);
    client
      .predict(&LocationQuery::parse("Boston, MA").unwrap())
      .await
      .unwrap();
    client
      .predict(&LocationQuery::parse("Boston,MA").unwrap())
      .await
      .unwrap();

    assert_eq!(client.cached_count(), 2);
  }

  #[tokio::test]
  async fn test_failures_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "predictions": [] })))
      .expect(2)
      .mount(&server)
      .await;

    let client = client_for(&server);
    let query = LocationQuery::parse("Nowhere, ZZ").unwrap();

    assert!(client.predict(&query).await.is_err());
    assert!(client.predict(&query).await.is_err());
    assert!(client.cached(&query).is_none());
  }
}
