use crate::config::Config;
use crate::forecast::api_types::{error_message, ApiPredictRequest, ApiPredictResponse};
use crate::forecast::error::ForecastError;
use crate::forecast::types::Forecast;
use crate::forecast::FORECAST_DAYS;
use crate::location::LocationQuery;
use color_eyre::{eyre::eyre, Result};
use serde_json::Value;
use url::Url;

/// HTTP client for the forecast backend
#[derive(Clone, Debug)]
pub struct ForecastClient {
  http: reqwest::Client,
  predict_url: Url,
}

impl ForecastClient {
  pub fn new(config: &Config) -> Result<Self> {
    Self::with_base_url(&config.server_url()?)
  }

  pub fn with_base_url(base: &Url) -> Result<Self> {
    // Make sure the base is treated as a directory so joining keeps any path prefix
    let mut base = base.clone();
    if !base.path().ends_with('/') {
      let path = format!("{}/", base.path());
      base.set_path(&path);
    }

    let predict_url = base
      .join("predict")
      .map_err(|e| eyre!("Failed to build predict URL from {}: {}", base, e))?;

    let http = reqwest::Client::builder()
      .user_agent(concat!("sunset/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, predict_url })
  }

  /// Request a one-day forecast for a validated location.
  ///
  /// The body is read in full and parsed as JSON before the status is
  /// looked at, so a non-JSON error page reports as an invalid response.
  pub async fn predict(&self, query: &LocationQuery) -> Result<Forecast, ForecastError> {
    let body = ApiPredictRequest {
      location: &query.raw,
      days: FORECAST_DAYS,
    };

    tracing::info!(location = %query.raw, days = FORECAST_DAYS, "requesting forecast");

    let response = self
      .http
      .post(self.predict_url.clone())
      .json(&body)
      .send()
      .await
      .map_err(|e| {
        tracing::warn!(error = %e, "forecast request failed");
        ForecastError::Transport(e)
      })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| {
      tracing::warn!(error = %e, "failed to read forecast response body");
      ForecastError::Transport(e)
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|e| {
      tracing::warn!(%status, error = %e, body = %text, "forecast response is not JSON");
      ForecastError::InvalidResponse(e)
    })?;

    if !status.is_success() {
      tracing::warn!(%status, body = %value, "forecast server returned an error");
      return Err(ForecastError::Server {
        status: status.as_u16(),
        message: error_message(&value),
      });
    }

    let envelope: ApiPredictResponse =
      serde_json::from_value(value).map_err(|e| ForecastError::InvalidForecast {
        reason: format!("unexpected response shape: {}", e),
      })?;

    let forecast = envelope.into_forecast(&query.raw).map_err(|e| {
      tracing::warn!(location = %query.raw, error = ?e, "forecast rejected");
      e
    })?;

    tracing::info!(
      location = %forecast.location,
      score = forecast.prediction.quality_score,
      "forecast received"
    );
    Ok(forecast)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use wiremock::matchers::{body_json, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn prediction_json() -> Value {
    json!({
      "date": "2024-06-01",
      "sunset_time": "2024-06-01T20:15:00-04:00",
      "weather_condition": "Clouds",
      "quality_score": 7,
      "clouds": 45,
      "wind_speed": 4.1,
      "temperature": 18
    })
  }

  fn client_for(server: &MockServer) -> ForecastClient {
    let base = Url::parse(&server.uri()).unwrap();
    ForecastClient::with_base_url(&base).unwrap()
  }

  fn boston() -> LocationQuery {
    LocationQuery::parse("Boston, MA").unwrap()
  }

  #[test]
  fn test_predict_url_keeps_path_prefix() {
    let base = Url::parse("https://sunsets.example.com/api").unwrap();
    let client = ForecastClient::with_base_url(&base).unwrap();
    assert_eq!(
      client.predict_url.as_str(),
      "https://sunsets.example.com/api/predict"
    );

    let base = Url::parse("http://127.0.0.1:5003").unwrap();
    let client = ForecastClient::with_base_url(&base).unwrap();
    assert_eq!(client.predict_url.as_str(), "http://127.0.0.1:5003/predict");
  }

  #[tokio::test]
  async fn test_predict_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .and(header("content-type", "application/json"))
      .and(body_json(json!({ "location": "Boston, MA", "days": 1 })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "location": "Boston, Massachusetts, United States",
        "predictions": [prediction_json()]
      })))
      .expect(1)
      .mount(&server)
      .await;

    let forecast = client_for(&server).predict(&boston()).await.unwrap();

    assert_eq!(forecast.location, "Boston, Massachusetts, United States");
    assert_eq!(forecast.prediction.date, "2024-06-01");
    assert_eq!(forecast.prediction.clouds, 45.0);
    assert_eq!(
      forecast.prediction.weather_condition.as_deref(),
      Some("Clouds")
    );
  }

  #[tokio::test]
  async fn test_predict_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .respond_with(ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"))
      .mount(&server)
      .await;

    let err = client_for(&server).predict(&boston()).await.unwrap_err();
    assert!(matches!(err, ForecastError::InvalidResponse(_)));
    assert_eq!(
      err.to_string(),
      "Invalid response from server. Please try again."
    );
  }

  #[tokio::test]
  async fn test_predict_server_error_with_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .respond_with(ResponseTemplate::new(404).set_body_json(json!({
        "error": "Location not found. Please try a different location."
      })))
      .mount(&server)
      .await;

    let err = client_for(&server).predict(&boston()).await.unwrap_err();
    assert!(matches!(err, ForecastError::Server { status: 404, .. }));
    assert_eq!(
      err.to_string(),
      "Location not found. Please try a different location."
    );
  }

  #[tokio::test]
  async fn test_predict_server_error_without_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .respond_with(ResponseTemplate::new(503).set_body_json(json!({})))
      .mount(&server)
      .await;

    let err = client_for(&server).predict(&boston()).await.unwrap_err();
    assert_eq!(err.to_string(), "Server error: 503");
  }

  #[tokio::test]
  async fn test_predict_error_field_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "error": "Weather service rate limit exceeded. Please try again later."
      })))
      .mount(&server)
      .await;

    let err = client_for(&server).predict(&boston()).await.unwrap_err();
    assert!(matches!(err, ForecastError::Api(_)));
  }

  #[tokio::test]
  async fn test_predict_empty_predictions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "location": "Boston",
        "predictions": []
      })))
      .mount(&server)
      .await;

    let err = client_for(&server).predict(&boston()).await.unwrap_err();
    assert!(err
      .to_string()
      .starts_with("No forecast data available"));
  }

  #[tokio::test]
  async fn test_predict_two_predictions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/predict"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "location": "Boston",
        "predictions": [prediction_json(), prediction_json()]
      })))
      .mount(&server)
      .await;

    let err = client_for(&server).predict(&boston()).await.unwrap_err();
    assert_eq!(err.to_string(), "Incomplete forecast data received");
  }

  #[tokio::test]
  async fn test_predict_unreachable_server() {
    // Grab a free port and release it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
      .unwrap()
      .local_addr()
      .unwrap()
      .port();
    let base = Url::parse(&format!("http://127.0.0.1:{}", port)).unwrap();
    let client = ForecastClient::with_base_url(&base).unwrap();

    let err = client.predict(&boston()).await.unwrap_err();
    assert!(matches!(err, ForecastError::Transport(_)));
  }
}
