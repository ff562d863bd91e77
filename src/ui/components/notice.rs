use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

/// Draw the error banner
pub fn draw_notice(frame: &mut Frame, area: Rect, message: &str) {
  let block = Block::default()
    .borders(Borders::ALL)
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(Color::Red));

  let paragraph = Paragraph::new(message)
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::White).bg(Color::Rgb(0x5c, 0x1a, 0x1a)));

  frame.render_widget(paragraph, area);
}
