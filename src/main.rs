mod app;
mod cache;
mod config;
mod controller;
mod event;
mod forecast;
mod location;
mod logging;
mod query;
mod ui;
mod view;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;

use crate::config::{Config, ServerConfig};
use crate::forecast::{Forecast, ForecastClient};
use crate::location::LocationQuery;
use crate::view::{RenderError, SunsetView};

#[derive(Parser, Debug)]
#[command(name = "sunset")]
#[command(about = "Sunset quality forecasts in your terminal")]
#[command(version)]
struct Args {
  /// Location as "City, ST"; submitted immediately
  location: Option<String>,

  /// Path to config file (default: $XDG_CONFIG_HOME/sunset/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Forecast server base URL
  #[arg(short, long)]
  server: Option<String>,

  /// Print the forecast and exit instead of starting the UI
  #[arg(long, requires = "location")]
  plain: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = Config::load(args.config.as_deref())?;

  // Override server if specified on command line
  let config = if let Some(url) = args.server {
    Config {
      server: ServerConfig { url },
      ..config
    }
  } else {
    config
  };

  let _log_guard = logging::init(&config.log)?;
  tracing::info!(server = %config.server.url, "starting");

  if args.plain {
    let location = args.location.unwrap_or_default();
    return print_forecast(&config, &location).await;
  }

  // Initialize and run the app
  let mut app = app::App::new(&config, args.location.as_deref())?;
  app.run().await?;

  Ok(())
}

/// One-shot forecast to stdout.
async fn print_forecast(config: &Config, location: &str) -> Result<()> {
  let query = LocationQuery::parse(location)?;
  let client = ForecastClient::new(config)?;

  let forecast = client.predict(&query).await?;

  for line in plain_output(&forecast)? {
    println!("{}", line);
  }
  Ok(())
}

/// The report already prefixes "Error:", so the notice text is not reused here.
fn plain_output(forecast: &Forecast) -> Result<Vec<String>> {
  let view = SunsetView::build(forecast).map_err(|RenderError::InvalidSunsetTime(raw)| {
    eyre!("Invalid sunset time received from server: {:?}", raw)
  })?;
  Ok(view.plain_lines())
}
