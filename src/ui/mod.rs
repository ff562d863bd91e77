mod components;
mod renderfns;
mod views;

pub use components::{InputResult, LocationInput};

use crate::app::App;
use ratatui::prelude::*;

const NOTICE_HEIGHT: u16 = 3;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let controller = app.controller();
  let notice = controller.notice();

  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Length(3), // Location input
      Constraint::Length(if notice.is_some() { NOTICE_HEIGHT } else { 0 }),
      Constraint::Min(1),    // Results
      Constraint::Length(1), // Footer
    ])
    .split(frame.area());

  let title = renderfns::truncate(app.title(), chunks[0].width.saturating_sub(24) as usize);
  renderfns::draw_header(frame, chunks[0], &title, controller.cached_count());

  app.input().render(frame, chunks[1]);

  if let Some(message) = notice {
    components::draw_notice(frame, chunks[2], message);
  }

  views::forecast::draw_forecast(frame, chunks[3], controller.view(), app.scroll());

  if let Some(elapsed) = controller.loading_for() {
    components::draw_loading_overlay(frame, chunks[3], elapsed);
  }

  renderfns::draw_footer(frame, chunks[4]);
}
