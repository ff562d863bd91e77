use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with app name, server and cache size
pub fn draw_header(frame: &mut Frame, area: Rect, title: &str, cached: usize) {
  let header = Line::from(vec![
    Span::styled(" sunset ", Style::default().fg(Color::Yellow).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", title), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!(" {} cached ", cached),
      Style::default().fg(Color::DarkGray),
    ),
  ]);

  let paragraph = Paragraph::new(header).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}
