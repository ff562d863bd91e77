use super::input::{InputResult, TextInput};
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const PLACEHOLDER: &str = "City, ST (e.g. Boston, MA)";

/// Location entry line shown above the results
#[derive(Debug, Clone, Default)]
pub struct LocationInput {
  input: TextInput,
}

impl LocationInput {
  pub fn new(initial: Option<&str>) -> Self {
    Self {
      input: initial.map(TextInput::with_value).unwrap_or_default(),
    }
  }

  pub fn value(&self) -> &str {
    self.input.value()
  }

  pub fn is_empty(&self) -> bool {
    self.input.is_empty()
  }

  pub fn clear(&mut self) {
    self.input.clear();
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
    self.input.handle_key(key)
  }

  pub fn render(&self, frame: &mut Frame, area: Rect) {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_type(BorderType::Rounded)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Location ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
      return;
    }

    let line = if self.input.is_empty() {
      Line::from(Span::styled(
        PLACEHOLDER,
        Style::default().fg(Color::DarkGray),
      ))
    } else {
      Line::from(Span::raw(self.input.value()))
    };
    frame.render_widget(Paragraph::new(line), inner);

    let offset = (self.input.cursor_position() as u16).min(inner.width.saturating_sub(1));
    frame.set_cursor_position((inner.x + offset, inner.y));
  }
}
