use ratatui::prelude::Color;
use std::time::Duration;

use crate::view::QualityTier;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Terminal color for a 0xRRGGBB value
pub fn rgb(value: u32) -> Color {
  Color::from_u32(value)
}

/// Get the display color for a quality tier
pub fn quality_color(tier: QualityTier) -> Color {
  rgb(tier.rgb())
}

/// Spinner frame for an elapsed loading time
pub fn spinner_frame(elapsed: Duration) -> char {
  let idx = (elapsed.as_millis() / 150) as usize % SPINNER.len();
  SPINNER[idx]
}
