use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap};

use crate::ui::renderfns::{quality_color, rgb, truncate};
use crate::view::SunsetView;

const STATS_HEIGHT: u16 = 4;

/// Draw the results panel for a forecast, or a hint when there is none
pub fn draw_forecast(frame: &mut Frame, area: Rect, view: Option<&SunsetView>, scroll: u16) {
  let Some(view) = view else {
    draw_empty(frame, area);
    return;
  };

  let from = rgb(view.backdrop.from);
  let to = rgb(view.backdrop.to);

  let title = truncate(&view.location, area.width.saturating_sub(4) as usize);
  let block = Block::default()
    .title(Span::styled(
      format!(" {} ", title),
      Style::default().fg(Color::White).bg(from).bold(),
    ))
    .title_bottom(Line::from(Span::styled(
      format!(" {} ", view.condition.as_deref().unwrap_or("--")),
      Style::default().fg(Color::White).bg(to),
    )))
    .borders(Borders::ALL)
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(from));

  let inner = block.inner(area);
  frame.render_widget(block, area);

  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),            // Date
      Constraint::Length(1),            // Spacer
      Constraint::Length(STATS_HEIGHT), // Stats row
      Constraint::Length(1),            // Spacer
      Constraint::Min(1),               // Tips
    ])
    .split(inner);

  let date = Paragraph::new(view.date.as_str())
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray));
  frame.render_widget(date, chunks[0]);

  draw_stats(frame, chunks[2], view);
  draw_tips(frame, chunks[4], view, scroll);
}

fn draw_empty(frame: &mut Frame, area: Rect) {
  let block = Block::default()
    .borders(Borders::ALL)
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(Color::DarkGray));

  let text = vec![
    Line::from(""),
    Line::from("Enter a location like \"Boston, MA\" and press Enter"),
    Line::from("to see tonight's sunset forecast."),
  ];
  let paragraph = Paragraph::new(text)
    .block(block)
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
  frame.render_widget(paragraph, area);
}

fn stat<'a>(label: &'a str, value: String, detail: Option<String>) -> Paragraph<'a> {
  let mut lines = vec![
    Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
    Line::from(Span::styled(value, Style::default().fg(Color::White).bold())),
  ];
  if let Some(detail) = detail {
    lines.push(Line::from(Span::styled(
      detail,
      Style::default().fg(Color::Gray),
    )));
  }
  Paragraph::new(lines).alignment(Alignment::Center)
}

fn draw_stats(frame: &mut Frame, area: Rect, view: &SunsetView) {
  let columns = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 4); 4])
    .split(area);

  frame.render_widget(
    stat(
      "Sunset Time",
      view.sunset.clone(),
      Some(format!("Arrive by {}", view.arrival)),
    ),
    columns[0],
  );

  let gauge = Gauge::default()
    .block(Block::default().title("Quality").title_alignment(Alignment::Center))
    .gauge_style(Style::default().fg(quality_color(view.quality)).bg(Color::Black))
    .ratio(view.score_ratio())
    .label(Span::styled(
      format!("{}/10", view.quality_score),
      Style::default().fg(Color::White).bold(),
    ));
  let gauge_area = Rect {
    height: area.height.min(3),
    ..columns[1]
  };
  frame.render_widget(gauge, gauge_area);

  frame.render_widget(
    stat("Cloud Cover", format!("{}%", view.clouds), None),
    columns[2],
  );

  frame.render_widget(
    stat(
      "Wind Speed",
      format!("{} m/s", view.wind_speed),
      view.temperature.map(|t| format!("{:.0}°C", t)),
    ),
    columns[3],
  );
}

fn draw_tips(frame: &mut Frame, area: Rect, view: &SunsetView, scroll: u16) {
  let block = Block::default()
    .title(Span::styled(
      " Photography Tips ",
      Style::default().fg(Color::Yellow).bold(),
    ))
    .borders(Borders::TOP)
    .border_style(Style::default().fg(Color::DarkGray));

  let text = vec![
    Line::from(view.tip.as_str()),
    Line::from(""),
    Line::from(Span::styled(
      view.advice.as_str(),
      Style::default().fg(Color::Gray),
    )),
  ];

  let paragraph = Paragraph::new(text)
    .block(block)
    .wrap(Wrap { trim: true })
    .scroll((scroll, 0));
  frame.render_widget(paragraph, area);
}
