use crate::config::Config;
use crate::controller::{ForecastController, Submission};
use crate::event::{Event, EventHandler};
use crate::forecast::CachedForecastClient;
use crate::ui::{self, InputResult, LocationInput};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::{stdout, Stdout};
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(100);
const PAGE_SCROLL: u16 = 5;

/// Main application state
pub struct App {
  controller: ForecastController,

  /// Location entry
  input: LocationInput,

  /// Header title
  title: String,

  /// Scroll offset of the tips section
  scroll: u16,

  /// Last view generation drawn, to detect newly shown forecasts
  seen_generation: u64,

  /// Submit the pre-filled location on startup
  submit_on_start: bool,

  should_quit: bool,
}

impl App {
  pub fn new(config: &Config, initial_location: Option<&str>) -> Result<Self> {
    let client = CachedForecastClient::new(config)?;
    let controller = ForecastController::new(client, config.notice_duration());

    Ok(Self {
      controller,
      input: LocationInput::new(initial_location),
      title: config.display_title(),
      scroll: 0,
      seen_generation: 0,
      submit_on_start: initial_location.is_some(),
      should_quit: false,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = self.event_loop(&mut terminal).await;

    // Cleanup terminal, even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
  }

  async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    let mut events = EventHandler::new(TICK_RATE);

    if self.submit_on_start {
      self.submit();
    }

    while !self.should_quit {
      // Draw UI
      terminal.draw(|frame| ui::draw(frame, self))?;

      // Handle events
      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }

    tracing::info!("exiting");
    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Resize => {}
      Event::Tick => {
        self.controller.tick();
      }
    }
    self.sync_scroll();
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    match self.input.handle_key(key) {
      InputResult::Submitted(_) => self.submit(),
      InputResult::Cancelled => {
        if !self.input.is_empty() {
          self.input.clear();
        } else if self.controller.notice().is_some() {
          self.controller.dismiss_notice();
        } else {
          self.should_quit = true;
        }
      }
      InputResult::Consumed => {}
      InputResult::NotHandled => self.handle_scroll_key(key),
    }
  }

  fn handle_scroll_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
      KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
      KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_SCROLL),
      KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE_SCROLL),
      _ => {}
    }
  }

  fn submit(&mut self) {
    let location = self.input.value().to_string();
    match self.controller.submit(&location) {
      Submission::Rejected => {}
      Submission::Cached => tracing::debug!(location = %location, "rendered from cache"),
      Submission::Requested => tracing::debug!(location = %location, "request started"),
    }
    self.sync_scroll();
  }

  /// Bring a newly shown forecast into view
  fn sync_scroll(&mut self) {
    let generation = self.controller.view_generation();
    if generation != self.seen_generation {
      self.seen_generation = generation;
      self.scroll = 0;
    }
  }

  // Accessors for UI rendering
  pub fn controller(&self) -> &ForecastController {
    &self.controller
  }

  pub fn input(&self) -> &LocationInput {
    &self.input
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn scroll(&self) -> u16 {
    self.scroll
  }
}
