//! Turns a forecast into a display-ready description.
//!
//! Everything here is pure: the terminal UI and `--plain` output both draw
//! from a `SunsetView` without further computation.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDateTime, TimeZone};
use thiserror::Error;

use crate::forecast::{Forecast, WeatherCondition};

/// How long before sunset to be on location.
const ARRIVAL_LEAD_MINUTES: i64 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
  #[error("Error: Invalid sunset time received from server")]
  InvalidSunsetTime(String),
}

/// Quality score bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
  Good,
  Warning,
  Poor,
}

impl QualityTier {
  pub fn from_score(score: f64) -> Self {
    if score >= 8.0 {
      Self::Good
    } else if score >= 6.0 {
      Self::Warning
    } else {
      Self::Poor
    }
  }

  /// 0xRRGGBB
  pub fn rgb(self) -> u32 {
    match self {
      Self::Good => 0x22c55e,
      Self::Warning => 0xeab308,
      Self::Poor => 0xef4444,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Good => "good",
      Self::Warning => "fair",
      Self::Poor => "poor",
    }
  }
}

/// Two-stop background gradient, as 0xRRGGBB values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
  pub from: u32,
  pub to: u32,
}

impl Gradient {
  const fn new(from: u32, to: u32) -> Self {
    Self { from, to }
  }
}

pub const DEFAULT_BACKDROP: Gradient = Gradient::new(0x1a365d, 0x2d3748);

/// Background gradient for a weather condition.
pub fn backdrop(condition: WeatherCondition) -> Gradient {
  match condition {
    WeatherCondition::Clear => Gradient::new(0xff6b6b, 0xffb88c),
    WeatherCondition::Clouds => Gradient::new(0x4b6cb7, 0x182848),
    WeatherCondition::Rain => Gradient::new(0x3e5151, 0xdecba4),
    WeatherCondition::Snow => Gradient::new(0xe6dada, 0x274046),
    WeatherCondition::Thunderstorm => Gradient::new(0x373b44, 0x4286f4),
    WeatherCondition::Mist => Gradient::new(0x606c88, 0x3f4c6b),
    WeatherCondition::Other => DEFAULT_BACKDROP,
  }
}

/// Photography advice from cloud cover (%) and wind speed (m/s).
pub fn photography_tip(clouds: f64, wind_speed: f64) -> String {
  let sky = if clouds <= 30.0 {
    "Clear skies suggest vibrant colors. Look for interesting foreground elements to add depth to your composition."
  } else if clouds <= 70.0 {
    "Partial cloud cover can create dramatic light rays and colorful cloud formations."
  } else {
    "Heavy cloud cover may diffuse the light. Focus on moody compositions and silhouettes."
  };

  let wind = if wind_speed <= 3.0 {
    "Low wind speeds are perfect for long exposures and reflections."
  } else if wind_speed <= 7.0 {
    "Moderate wind might create interesting cloud movements."
  } else {
    "High winds may cause camera shake. Use a sturdy tripod and faster shutter speeds."
  };

  format!("{} {}", sky, wind)
}

/// Parse a backend timestamp.
///
/// RFC 3339 with an offset is expected. A timestamp without an offset is
/// taken to be local time.
pub fn parse_sunset(raw: &str) -> Result<DateTime<FixedOffset>, RenderError> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(dt);
  }

  ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .and_then(|naive| Local.from_local_datetime(&naive).earliest())
    .map(|dt| dt.fixed_offset())
    .ok_or_else(|| RenderError::InvalidSunsetTime(raw.to_string()))
}

pub fn arrival_time(sunset: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
  *sunset - Duration::minutes(ARRIVAL_LEAD_MINUTES)
}

/// 12-hour clock, e.g. "6:45 PM".
pub fn format_clock(time: &DateTime<FixedOffset>) -> String {
  time.format("%-I:%M %p").to_string()
}

/// Everything needed to draw one forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct SunsetView {
  pub location: String,
  pub date: String,
  pub sunset: String,
  pub arrival: String,
  pub quality_score: f64,
  pub quality: QualityTier,
  pub condition: Option<String>,
  pub backdrop: Gradient,
  pub clouds: f64,
  pub wind_speed: f64,
  pub temperature: Option<f64>,
  pub tip: String,
  pub advice: String,
}

impl SunsetView {
  pub fn build(forecast: &Forecast) -> Result<Self, RenderError> {
    let prediction = &forecast.prediction;

    let sunset_at = parse_sunset(&prediction.sunset_time)?;
    let sunset = format_clock(&sunset_at);
    let arrival = format_clock(&arrival_time(&sunset_at));

    let advice = format!(
      "For the best experience, arrive by {} to set up your equipment and find the perfect composition. Sunset will occur at {}.",
      arrival, sunset
    );

    Ok(Self {
      location: forecast.location.clone(),
      date: prediction.date.clone(),
      sunset,
      arrival,
      quality_score: prediction.quality_score,
      quality: QualityTier::from_score(prediction.quality_score),
      condition: prediction.weather_condition.clone(),
      backdrop: backdrop(prediction.condition()),
      clouds: prediction.clouds,
      wind_speed: prediction.wind_speed,
      temperature: prediction.temperature,
      tip: photography_tip(prediction.clouds, prediction.wind_speed),
      advice,
    })
  }

  /// Score as a 0.0-1.0 ratio for gauges.
  pub fn score_ratio(&self) -> f64 {
    (self.quality_score / 10.0).clamp(0.0, 1.0)
  }

  /// Text rendering for non-interactive output.
  pub fn plain_lines(&self) -> Vec<String> {
    let mut lines = vec![
      self.location.clone(),
      self.date.clone(),
      String::new(),
      format!("{:13}{} (arrive by {})", "Sunset", self.sunset, self.arrival),
      format!(
        "{:13}{}/10 ({})",
        "Quality",
        self.quality_score,
        self.quality.label()
      ),
      format!(
        "{:13}{}",
        "Conditions",
        self.condition.as_deref().unwrap_or("--")
      ),
      format!("{:13}{}%", "Cloud cover", self.clouds),
      format!("{:13}{} m/s", "Wind", self.wind_speed),
    ];
    if let Some(temp) = self.temperature {
      lines.push(format!("{:13}{:.0}°C", "Temperature", temp));
    }
    lines.push(String::new());
    lines.push("Photography tips".to_string());
    lines.push(self.tip.clone());
    lines.push(self.advice.clone());
    lines
  }
}
