//! Configuration management
//!
//! Configuration loads from environment variables (`TASTEMAP_*`, plus
//! `GOOGLE_API_KEY` for the place provider) or from a TOML file, and is
//! validated once at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::pipeline::PipelineConfig;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scraper/pipeline configuration
    pub scraper: ScraperConfig,

    /// Place-lookup provider configuration
    pub places: PlacesConfig,

    /// Web search provider configuration
    pub search: SearchConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Scraper and pipeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Article fetch timeout in seconds
    pub fetch_timeout_secs: u64,

    /// Article fetch pacing (requests per second)
    pub fetch_rate_per_sec: u32,

    /// Concurrent article fetches
    pub fetch_concurrency: usize,

    /// Concurrent place lookups
    pub lookup_concurrency: usize,

    /// Venue names taken from a single article
    pub names_per_article: usize,
}

/// Place-lookup provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// API key, supplied out-of-band (`GOOGLE_API_KEY`)
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Endpoint override (mock servers in tests)
    pub endpoint: Option<String>,
}

/// Web search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Endpoint override (mock servers in tests)
    pub endpoint: Option<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// CORS allow-list; front-end origins in dev and production
    pub allowed_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY").unwrap_or_default();

        let allowed_origins = std::env::var("TASTEMAP_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    String::from("http://localhost:5173"),
                    String::from("http://localhost:4173"),
                ]
            });

        Ok(Self {
            scraper: ScraperConfig {
                fetch_timeout_secs: env_parse("TASTEMAP_FETCH_TIMEOUT", 10),
                fetch_rate_per_sec: env_parse("TASTEMAP_FETCH_RATE", 2),
                fetch_concurrency: env_parse("TASTEMAP_FETCH_CONCURRENCY", 4),
                lookup_concurrency: env_parse("TASTEMAP_LOOKUP_CONCURRENCY", 4),
                names_per_article: env_parse("TASTEMAP_NAMES_PER_ARTICLE", 5),
            },
            places: PlacesConfig {
                api_key,
                timeout_secs: env_parse("TASTEMAP_PLACES_TIMEOUT", 10),
                endpoint: std::env::var("TASTEMAP_PLACES_ENDPOINT").ok(),
            },
            search: SearchConfig {
                timeout_secs: env_parse("TASTEMAP_SEARCH_TIMEOUT", 15),
                endpoint: std::env::var("TASTEMAP_SEARCH_ENDPOINT").ok(),
            },
            database: DatabaseConfig {
                sqlite_path: std::env::var("TASTEMAP_SQLITE_PATH")
                    .unwrap_or_else(|_| String::from("data/tastemap.db"))
                    .into(),
            },
            server: ServerConfig {
                host: std::env::var("TASTEMAP_HOST")
                    .unwrap_or_else(|_| String::from("127.0.0.1")),
                port: env_parse("TASTEMAP_PORT", 8000),
                allowed_origins,
            },
            logging: LoggingConfig {
                level: std::env::var("TASTEMAP_LOG_LEVEL")
                    .unwrap_or_else(|_| String::from("info")),
                format: std::env::var("TASTEMAP_LOG_FORMAT")
                    .unwrap_or_else(|_| String::from("text")),
            },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.scraper.fetch_timeout_secs == 0 {
            anyhow::bail!("fetch_timeout_secs must be greater than zero");
        }
        if self.scraper.fetch_concurrency == 0 || self.scraper.lookup_concurrency == 0 {
            anyhow::bail!("concurrency limits must be greater than zero");
        }
        if self.scraper.names_per_article == 0 {
            anyhow::bail!("names_per_article must be greater than zero");
        }
        if self.server.port == 0 {
            anyhow::bail!("server port must be greater than zero");
        }
        Ok(())
    }

    /// Pipeline tuning derived from the scraper section
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            fetch_concurrency: self.scraper.fetch_concurrency,
            lookup_concurrency: self.scraper.lookup_concurrency,
            names_per_article: self.scraper.names_per_article,
            fetch_rate_per_sec: self.scraper.fetch_rate_per_sec,
            fetch_timeout: Duration::from_secs(self.scraper.fetch_timeout_secs),
        }
    }

    /// Place-lookup request timeout
    pub fn places_timeout(&self) -> Duration {
        Duration::from_secs(self.places.timeout_secs)
    }

    /// Web search request timeout
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig {
                fetch_timeout_secs: 10,
                fetch_rate_per_sec: 2,
                fetch_concurrency: 4,
                lookup_concurrency: 4,
                names_per_article: 5,
            },
            places: PlacesConfig {
                api_key: String::new(),
                timeout_secs: 10,
                endpoint: None,
            },
            search: SearchConfig {
                timeout_secs: 15,
                endpoint: None,
            },
            database: DatabaseConfig {
                sqlite_path: PathBuf::from("data/tastemap.db"),
            },
            server: ServerConfig {
                host: String::from("127.0.0.1"),
                port: 8000,
                allowed_origins: vec![
                    String::from("http://localhost:5173"),
                    String::from("http://localhost:4173"),
                ],
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.scraper.fetch_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pipeline_config_derivation() {
        let config = Config::default();
        let pipeline = config.pipeline_config();
        assert_eq!(pipeline.fetch_concurrency, 4);
        assert_eq!(pipeline.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.scraper.names_per_article, 5);
    }
}
