//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub gateway: ServerConfig,
    pub cors: CorsConfig,
    pub stream: StreamConfig,
    pub producers: ProducerConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Parse a case-insensitive environment name
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Server bind configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
///
/// An empty origin list means any origin is allowed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Per-connection streaming settings
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// How long a session waits for inbound data before looping again
    pub poll_timeout_ms: u64,
    /// Capacity of each connection's outbound queue
    pub outbound_buffer: usize,
    /// How long a single enqueue may wait before the connection is treated as broken
    pub send_timeout_ms: u64,
    /// Push interval of the per-pattern performance stream
    pub subject_interval_secs: u64,
}

impl StreamConfig {
    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    #[must_use]
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    #[must_use]
    pub fn subject_interval(&self) -> Duration {
        Duration::from_secs(self.subject_interval_secs)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: 1_000,
            outbound_buffer: 100,
            send_timeout_ms: 5_000,
            subject_interval_secs: 10,
        }
    }
}

/// Background producer timings, in seconds
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerConfig {
    pub pattern_min_secs: f64,
    pub pattern_max_secs: f64,
    pub pattern_fallback_secs: f64,
    pub ai_min_secs: f64,
    pub ai_max_secs: f64,
    pub ai_fallback_secs: f64,
    pub health_interval_secs: f64,
    pub health_fallback_secs: f64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            pattern_min_secs: 15.0,
            pattern_max_secs: 45.0,
            pattern_fallback_secs: 30.0,
            ai_min_secs: 30.0,
            ai_max_secs: 60.0,
            ai_fallback_secs: 60.0,
            health_interval_secs: 120.0,
            health_fallback_secs: 120.0,
        }
    }
}

impl ProducerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("PRODUCER_PATTERN_MIN_SECS", self.pattern_min_secs),
            ("PRODUCER_PATTERN_MAX_SECS", self.pattern_max_secs),
            ("PRODUCER_PATTERN_FALLBACK_SECS", self.pattern_fallback_secs),
            ("PRODUCER_AI_MIN_SECS", self.ai_min_secs),
            ("PRODUCER_AI_MAX_SECS", self.ai_max_secs),
            ("PRODUCER_AI_FALLBACK_SECS", self.ai_fallback_secs),
            ("PRODUCER_HEALTH_INTERVAL_SECS", self.health_interval_secs),
            ("PRODUCER_HEALTH_FALLBACK_SECS", self.health_fallback_secs),
        ];

        for (key, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue(key, value.to_string()));
            }
        }

        if self.pattern_min_secs > self.pattern_max_secs {
            return Err(ConfigError::InvalidValue(
                "PRODUCER_PATTERN_MIN_SECS",
                format!("{} exceeds maximum {}", self.pattern_min_secs, self.pattern_max_secs),
            ));
        }

        if self.ai_min_secs > self.ai_max_secs {
            return Err(ConfigError::InvalidValue(
                "PRODUCER_AI_MIN_SECS",
                format!("{} exceeds maximum {}", self.ai_min_secs, self.ai_max_secs),
            ));
        }

        Ok(())
    }
}

// Default value functions
fn default_app_name() -> String {
    "quantora-hub".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stream_defaults = StreamConfig::default();
        let producer_defaults = ProducerConfig::default();

        let producers = ProducerConfig {
            pattern_min_secs: parse_or(&lookup, "PRODUCER_PATTERN_MIN_SECS", producer_defaults.pattern_min_secs)?,
            pattern_max_secs: parse_or(&lookup, "PRODUCER_PATTERN_MAX_SECS", producer_defaults.pattern_max_secs)?,
            pattern_fallback_secs: parse_or(
                &lookup,
                "PRODUCER_PATTERN_FALLBACK_SECS",
                producer_defaults.pattern_fallback_secs,
            )?,
            ai_min_secs: parse_or(&lookup, "PRODUCER_AI_MIN_SECS", producer_defaults.ai_min_secs)?,
            ai_max_secs: parse_or(&lookup, "PRODUCER_AI_MAX_SECS", producer_defaults.ai_max_secs)?,
            ai_fallback_secs: parse_or(&lookup, "PRODUCER_AI_FALLBACK_SECS", producer_defaults.ai_fallback_secs)?,
            health_interval_secs: parse_or(
                &lookup,
                "PRODUCER_HEALTH_INTERVAL_SECS",
                producer_defaults.health_interval_secs,
            )?,
            health_fallback_secs: parse_or(
                &lookup,
                "PRODUCER_HEALTH_FALLBACK_SECS",
                producer_defaults.health_fallback_secs,
            )?,
        };
        producers.validate()?;

        let env = match lookup("APP_ENV") {
            Some(value) => Environment::parse(&value).ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
            None => default_env(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            gateway: ServerConfig {
                host: lookup("GATEWAY_HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "GATEWAY_PORT", default_port())?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            stream: StreamConfig {
                poll_timeout_ms: parse_or(&lookup, "STREAM_POLL_TIMEOUT_MS", stream_defaults.poll_timeout_ms)?,
                outbound_buffer: parse_or(&lookup, "STREAM_OUTBOUND_BUFFER", stream_defaults.outbound_buffer)?
                    .max(1),
                send_timeout_ms: parse_or(&lookup, "STREAM_SEND_TIMEOUT_MS", stream_defaults.send_timeout_ms)?,
                subject_interval_secs: parse_or(
                    &lookup,
                    "STREAM_SUBJECT_INTERVAL_SECS",
                    stream_defaults.subject_interval_secs,
                )?
                .max(1),
            },
            producers,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            gateway: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            cors: CorsConfig::default(),
            stream: StreamConfig::default(),
            producers: ProducerConfig::default(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
