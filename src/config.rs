use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5003";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  pub server: ServerConfig,
  /// Seconds an error notice stays on screen
  pub notice_secs: u64,
  /// Custom title for header (defaults to the server host if not set)
  pub title: Option<String>,
  pub log: LogConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      server: ServerConfig::default(),
      notice_secs: 5,
      title: None,
      log: LogConfig::default(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  /// Base URL of the forecast backend; `/predict` is resolved against it
  pub url: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      url: DEFAULT_SERVER_URL.to_string(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
  /// Filter used when RUST_LOG is not set
  pub level: String,
  /// Directory for log files (defaults to the platform data dir)
  pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: "info".to_string(),
      directory: None,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./sunset.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/sunset/config.yaml
  ///
  /// Without any file the defaults are used. `SUNSET_SERVER_URL` overrides
  /// the server URL from the file.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Self::default(),
    };

    if let Some(url) = Self::server_url_from_env() {
      config.server.url = url;
    }

    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("sunset.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("sunset").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn from_yaml(contents: &str) -> Result<Self> {
    // An empty file deserializes to null; treat it as all defaults
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_yaml::from_str(contents)?)
  }

  /// Get the server URL override from the environment.
  ///
  /// Checks SUNSET_SERVER_URL.
  fn server_url_from_env() -> Option<String> {
    std::env::var("SUNSET_SERVER_URL")
      .ok()
      .filter(|url| !url.trim().is_empty())
  }

  /// Parsed backend base URL.
  pub fn server_url(&self) -> Result<Url> {
    Url::parse(&self.server.url)
      .map_err(|e| eyre!("Invalid server URL {:?}: {}", self.server.url, e))
  }

  pub fn notice_duration(&self) -> Duration {
    Duration::from_secs(self.notice_secs)
  }

  /// Header title: configured title or the server host.
  pub fn display_title(&self) -> String {
    self
      .title
      .clone()
      .unwrap_or_else(|| extract_domain(&self.server.url).to_string())
  }
}

/// Extract host[:port] from a URL string
fn extract_domain(url: &str) -> &str {
  url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url)
    .split('/')
    .next()
    .unwrap_or(url)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server.url, "http://127.0.0.1:5003");
    assert_eq!(config.notice_duration(), Duration::from_secs(5));
    assert_eq!(config.log.level, "info");
  }

  #[test]
  fn test_partial_yaml_keeps_defaults() {
    let config = Config::from_yaml("server:\n  url: https://sunsets.example.com/api/\n").unwrap();
    assert_eq!(config.server.url, "https://sunsets.example.com/api/");
    assert_eq!(config.notice_secs, 5);
  }

  #[test]
  fn test_full_yaml() {
    let yaml = r#"
server:
  url: http://localhost:8080
notice_secs: 8
title: Sunsets
log:
  level: debug
  directory: /tmp/sunset-logs
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.notice_secs, 8);
    assert_eq!(config.display_title(), "Sunsets");
    assert_eq!(config.log.level, "debug");
    assert_eq!(
      config.log.directory.as_deref(),
      Some(Path::new("/tmp/sunset-logs"))
    );
  }

  #[test]
  fn test_empty_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.notice_secs, 5);
  }

  #[test]
  fn test_invalid_server_url() {
    let config = Config {
      server: ServerConfig {
        url: "not a url".to_string(),
      },
      ..Config::default()
    };
    assert!(config.server_url().is_err());
  }

  #[test]
  fn test_missing_explicit_path() {
    let result = Config::load(Some(Path::new("/definitely/not/here.yaml")));
    assert!(result.is_err());
  }

  #[test]
  fn test_extract_domain() {
    assert_eq!(
      extract_domain("https://sunsets.example.com"),
      "sunsets.example.com"
    );
    assert_eq!(
      extract_domain("https://sunsets.example.com/api"),
      "sunsets.example.com"
    );
    assert_eq!(extract_domain("http://127.0.0.1:5003"), "127.0.0.1:5003");
  }

  #[test]
  fn test_title_defaults_to_host() {
    assert_eq!(Config::default().display_title(), "127.0.0.1:5003");
  }
}
