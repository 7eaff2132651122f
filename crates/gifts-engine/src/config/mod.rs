use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::gifts::domain::DEFAULT_LANGUAGE;

/// Deployment stage, read from `APP_ENV`. Unknown values fall back to development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the gifts service reads from the environment (and an optional `.env` file).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub assessment: AssessmentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::parse(&var_or("APP_ENV", "development")),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig::from_env(),
            assessment: AssessmentConfig::from_env()?,
        })
    }
}

fn var_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}

/// Listen address for the assessment API. `localhost` is accepted as an alias for loopback.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = var_or("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Self {
            host: var_or("APP_HOST", "127.0.0.1"),
            port,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter used when `RUST_LOG` is unset.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl TelemetryConfig {
    fn from_env() -> Self {
        Self {
            log_level: var_or("APP_LOG_LEVEL", "info"),
        }
    }
}

/// Assessment defaults applied when a submission leaves them out.
#[derive(Debug, Clone)]
pub struct AssessmentConfig {
    /// Lowercased language tag recorded on attempts submitted without one.
    pub default_language: String,
}

impl AssessmentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let default_language = var_or("GIFTS_DEFAULT_LANGUAGE", DEFAULT_LANGUAGE)
            .trim()
            .to_ascii_lowercase();
        if default_language.is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }

        Ok(Self { default_language })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyLanguage,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyLanguage => {
                write!(f, "GIFTS_DEFAULT_LANGUAGE must not be blank")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::EmptyLanguage => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
