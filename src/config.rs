use crate::error::{Result, WeatherOddsError};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub open_meteo: OpenMeteoConfig,
    pub imagery: ImageryConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
    pub max_body_bytes: usize,
}

/// Accepts a number or a string so `${PORT}` substitution works.
fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(value) => value.trim().parse::<u16>().map_err(|_| {
            D::Error::custom(format!(
                "invalid port '{}' - ensure the PORT environment variable is set",
                value
            ))
        }),
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| WeatherOddsError::Config(format!("Invalid listen address: {}", e)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            cors_origins: Vec::new(),
            max_body_bytes: 16 * 1024,
        }
    }
}

/// Accepted `open_meteo.history_years`. The archive starts in 1940.
const HISTORY_YEARS: std::ops::RangeInclusive<u32> = 1..=80;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenMeteoConfig {
    pub geocoding_url: String,
    pub archive_url: String,
    pub geocoding_timeout_secs: u64,
    pub archive_timeout_secs: u64,
    /// Full years fetched before the last completed year.
    pub history_years: u32,
}

impl OpenMeteoConfig {
    pub fn geocoding_timeout(&self) -> Duration {
        Duration::from_secs(self.geocoding_timeout_secs)
    }

    pub fn archive_timeout(&self) -> Duration {
        Duration::from_secs(self.archive_timeout_secs)
    }
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com/v1/search".into(),
            archive_url: "https://archive-api.open-meteo.com/v1/archive".into(),
            geocoding_timeout_secs: 10,
            archive_timeout_secs: 30,
            history_years: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageryConfig {
    pub enabled: bool,
}

impl Default for ImageryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load from `config_override`, else the first config found in the
    /// standard locations, else built-in defaults.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(WeatherOddsError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::info!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| WeatherOddsError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::info!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Parse YAML after substituting `${VAR}` references from the environment.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| WeatherOddsError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        for (name, url) in [
            ("geocoding_url", &self.open_meteo.geocoding_url),
            ("archive_url", &self.open_meteo.archive_url),
        ] {
            reqwest::Url::parse(url).map_err(|e| {
                WeatherOddsError::Config(format!("open_meteo.{} '{}' is invalid: {}", name, url, e))
            })?;
        }

        if self.open_meteo.geocoding_timeout_secs == 0 || self.open_meteo.archive_timeout_secs == 0
        {
            return Err(WeatherOddsError::Config(
                "open_meteo timeouts must be at least one second".into(),
            ));
        }

        if !HISTORY_YEARS.contains(&self.open_meteo.history_years) {
            return Err(WeatherOddsError::Config(format!(
                "open_meteo.history_years must be between {} and {}, got {}",
                HISTORY_YEARS.start(),
                HISTORY_YEARS.end(),
                self.open_meteo.history_years
            )));
        }

        Ok(())
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        let xdg_config = dirs::config_dir()?.join("weather-odds").join("config.yaml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Default path for writing new config files (~/.config/weather-odds/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WeatherOddsError::Config("Cannot determine config directory".into()))?
            .join("weather-odds");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        let defaults = Self::default();

        println!();
        println!("Let's set up weather-odds!");
        println!();

        println!("HTTP server");
        let host: String = Input::new()
            .with_prompt("  Listen host")
            .default(defaults.server.host.clone())
            .interact_text()
            .map_err(|e| WeatherOddsError::Config(format!("Input error: {}", e)))?;

        let port: u16 = Input::new()
            .with_prompt("  Listen port")
            .default(defaults.server.port)
            .interact_text()
            .map_err(|e| WeatherOddsError::Config(format!("Input error: {}", e)))?;

        let origins: String = Input::new()
            .with_prompt("  Allowed CORS origins (comma separated, blank for any)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| WeatherOddsError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Open-Meteo");
        let history_years: u32 = Input::new()
            .with_prompt("  Years of history before last year")
            .default(defaults.open_meteo.history_years)
            .interact_text()
            .map_err(|e| WeatherOddsError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            server: ServerConfig {
                host,
                port,
                cors_origins: parse_origins(&origins),
                ..defaults.server
            },
            open_meteo: OpenMeteoConfig {
                history_years,
                ..defaults.open_meteo
            },
            imagery: defaults.imagery,
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| WeatherOddsError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# weather-odds configuration\n# Generated by `weather-odds init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| WeatherOddsError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
