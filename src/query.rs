//! Handle for a single in-flight async request.
//!
//! A `Query<T>` owns at most one spawned task. Starting a new request aborts
//! the previous task and drops its result channel, so a superseded response
//! can never be observed.
//!
//! # Example
//!
//! ```ignore
//! let mut query = Query::new();
//! let client = client.clone();
//! query.start(async move { client.predict(&location).await.map_err(|e| e.to_string()) });
//!
//! // In event loop tick
//! if query.poll() {
//!     // State changed, trigger re-render
//! }
//!
//! match query.state() {
//!     QueryState::Loading => render_spinner(),
//!     QueryState::Success(data) => render_data(data),
//!     QueryState::Error(e) => render_error(e),
//!     QueryState::Idle => {}
//! }
//! ```

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The state of a query
#[derive(Debug, Clone)]
pub enum QueryState<T> {
  /// Nothing requested yet, or the last request was cancelled
  Idle,
  /// Request in flight
  Loading,
  /// Request completed successfully
  Success(T),
  /// Request failed with a user-facing message
  Error(String),
}

impl<T> QueryState<T> {
  pub fn is_loading(&self) -> bool {
    matches!(self, QueryState::Loading)
  }
}

/// Single-slot async request with cancellation.
pub struct Query<T> {
  state: QueryState<T>,
  receiver: Option<mpsc::UnboundedReceiver<Result<T, String>>>,
  handle: Option<JoinHandle<()>>,
  started_at: Option<Instant>,
}

impl<T: Send + 'static> Query<T> {
  pub fn new() -> Self {
    Self {
      state: QueryState::Idle,
      receiver: None,
      handle: None,
      started_at: None,
    }
  }

  /// Get the current state of the query.
  pub fn state(&self) -> &QueryState<T> {
    &self.state
  }

  pub fn is_loading(&self) -> bool {
    self.state.is_loading()
  }

  /// How long the current request has been running.
  pub fn elapsed(&self) -> Option<Duration> {
    match self.state {
      QueryState::Loading => self.started_at.map(|t| t.elapsed()),
      _ => None,
    }
  }

  /// Start a request, aborting any request still in flight.
  pub fn start<Fut>(&mut self, future: Fut)
  where
    Fut: Future<Output = Result<T, String>> + Send + 'static,
  {
    self.cancel();

    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);
    self.state = QueryState::Loading;
    self.started_at = Some(Instant::now());

    self.handle = Some(tokio::spawn(async move {
      let result = future.await;
      // Ignore send errors - receiver may have been dropped
      let _ = tx.send(result);
    }));
  }

  /// Abort the request in flight, if any.
  ///
  /// Returns `true` if a request was actually cancelled. The state goes back
  /// to `Idle` in that case; completed results are left alone.
  pub fn cancel(&mut self) -> bool {
    self.receiver = None;
    let Some(handle) = self.handle.take() else {
      return false;
    };

    handle.abort();

    if !self.state.is_loading() {
      return false;
    }
    self.state = QueryState::Idle;
    self.started_at = None;
    true
  }

  /// Poll for results from a pending request.
  ///
  /// Returns `true` if the state changed (data arrived or error occurred).
  /// Call this in your event loop tick handler.
  pub fn poll(&mut self) -> bool {
    let receiver = match &mut self.receiver {
      Some(rx) => rx,
      None => return false,
    };

    // Try to receive without blocking
    match receiver.try_recv() {
      Ok(Ok(data)) => {
        self.state = QueryState::Success(data);
        self.finish();
        true
      }
      Ok(Err(error)) => {
        self.state = QueryState::Error(error);
        self.finish();
        true
      }
      Err(mpsc::error::TryRecvError::Empty) => false,
      Err(mpsc::error::TryRecvError::Disconnected) => {
        // Task ended without sending - it panicked
        self.state = QueryState::Error("Request ended unexpectedly".to_string());
        self.finish();
        true
      }
    }
  }

  fn finish(&mut self) {
    self.receiver = None;
    self.handle = None;
    self.started_at = None;
  }
}

impl<T: Send + 'static> Default for Query<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Drop for Query<T> {
  fn drop(&mut self) {
    if let Some(handle) = self.handle.take() {
      handle.abort();
    }
  }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Query<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Query")
      .field("state", &self.state)
      .field("started_at", &self.started_at)
      .finish_non_exhaustive()
  }
}
