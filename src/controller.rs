//! Session-scoped forecast request controller.
//!
//! Owns everything that changes while the user searches: the cached client,
//! the single in-flight request, the loading flag, the transient notice and
//! the currently displayed view. The UI only reads from it.

use std::time::{Duration, Instant};

use crate::forecast::{CachedForecastClient, Forecast};
use crate::location::LocationQuery;
use crate::query::{Query, QueryState};
use crate::view::SunsetView;

/// What happened to a submitted location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
  /// Input failed validation; a notice explains why
  Rejected,
  /// Served from the session cache and rendered immediately
  Cached,
  /// Request sent; result arrives through `tick`
  Requested,
}

/// Transient message shown to the user.
#[derive(Debug, Clone)]
pub struct Notice {
  pub message: String,
  shown_at: Instant,
  ttl: Duration,
}

impl Notice {
  fn new(message: String, ttl: Duration) -> Self {
    Self {
      message,
      shown_at: Instant::now(),
      ttl,
    }
  }

  pub fn is_expired(&self) -> bool {
    self.shown_at.elapsed() >= self.ttl
  }
}

pub struct ForecastController {
  client: CachedForecastClient,
  query: Query<Forecast>,
  notice: Option<Notice>,
  notice_ttl: Duration,
  view: Option<SunsetView>,
  /// Bumped whenever a new view is shown so the UI can reset its scroll
  view_generation: u64,
}

impl ForecastController {
  pub fn new(client: CachedForecastClient, notice_ttl: Duration) -> Self {
    Self {
      client,
      query: Query::new(),
      notice: None,
      notice_ttl,
      view: None,
      view_generation: 0,
    }
  }

  /// Validate a location and either render it from cache or start a request.
  ///
  /// Rejected input leaves any request in flight untouched.
  pub fn submit(&mut self, raw: &str) -> Submission {
    let query = match LocationQuery::parse(raw) {
      Ok(query) => query,
      Err(e) => {
        tracing::debug!(input = raw, error = %e, "location rejected");
        self.set_notice(e.to_string());
        return Submission::Rejected;
      }
    };

    tracing::debug!(location = %query.display_name(), "location accepted");
    self.notice = None;

    if let Some(forecast) = self.client.cached(&query) {
      tracing::info!(location = %query.raw, "serving forecast from cache");
      if self.query.cancel() {
        tracing::debug!("cancelled superseded forecast request");
      }
      self.show(&forecast);
      return Submission::Cached;
    }

    if self.query.is_loading() {
      tracing::debug!(location = %query.raw, "superseding forecast request in flight");
    }

    let client = self.client.clone();
    self.query.start(async move {
      let result = client.predict(&query).await.map_err(|e| e.to_string())?;
      if result.is_cached() {
        tracing::debug!(cached_at = ?result.cached_at, "forecast cached by an earlier request");
      }
      Ok(result.data)
    });

    Submission::Requested
  }

  /// Poll the request in flight and expire the notice.
  ///
  /// Returns `true` if anything visible changed.
  pub fn tick(&mut self) -> bool {
    let mut changed = false;

    if self.query.poll() {
      changed = true;
      match self.query.state() {
        QueryState::Success(forecast) => {
          let forecast = forecast.clone();
          self.show(&forecast);
        }
        QueryState::Error(message) => {
          let message = message.clone();
          tracing::warn!(error = %message, "forecast request failed");
          self.set_notice(message);
        }
        QueryState::Idle | QueryState::Loading => {}
      }
    }

    if self.notice.as_ref().is_some_and(Notice::is_expired) {
      self.notice = None;
      changed = true;
    }

    changed
  }

  /// Build and display a view. A render failure keeps the previous view.
  fn show(&mut self, forecast: &Forecast) {
    match SunsetView::build(forecast) {
      Ok(view) => {
        self.view = Some(view);
        self.view_generation += 1;
      }
      Err(e) => {
        tracing::warn!(
          sunset_time = %forecast.prediction.sunset_time,
          error = %e,
          "failed to render forecast"
        );
        self.set_notice(e.to_string());
      }
    }
  }

  fn set_notice(&mut self, message: String) {
    self.notice = Some(Notice::new(message, self.notice_ttl));
  }

  pub fn dismiss_notice(&mut self) {
    self.notice = None;
  }

  /// How long the current request has been running.
  pub fn loading_for(&self) -> Option<Duration> {
    self.query.elapsed()
  }

  pub fn notice(&self) -> Option<&str> {
    self.notice.as_ref().map(|n| n.message.as_str())
  }

  pub fn view(&self) -> Option<&SunsetView> {
    self.view.as_ref()
  }

  pub fn view_generation(&self) -> u64 {
    self.view_generation
  }

  pub fn cached_count(&self) -> usize {
    self.client.cached_count()
  }
}
