use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::ui::renderfns::spinner_frame;
use std::time::Duration;

/// Centered box, 60% of the width within 24..=40 columns
fn overlay_area(area: Rect) -> Rect {
  let width = (u32::from(area.width) * 60 / 100) as u16;
  let width = width.clamp(24.min(area.width), 40.min(area.width));
  let height = 3.min(area.height);

  let x = area.x + (area.width - width) / 2;
  let y = area.y + (area.height - height) / 2;
  Rect::new(x, y, width, height)
}

/// Draw the loading overlay centered in `area`
pub fn draw_loading_overlay(frame: &mut Frame, area: Rect, elapsed: Duration) {
  let overlay_area = overlay_area(area);

  // Clear the area behind the overlay
  frame.render_widget(Clear, overlay_area);

  let block = Block::default()
    .borders(Borders::ALL)
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(Color::Yellow));

  let line = Line::from(vec![
    Span::styled(
      spinner_frame(elapsed).to_string(),
      Style::default().fg(Color::Yellow),
    ),
    Span::raw(" Fetching forecast..."),
  ]);

  let paragraph = Paragraph::new(line)
    .block(block)
    .alignment(Alignment::Center);
  frame.render_widget(paragraph, overlay_area);
}
