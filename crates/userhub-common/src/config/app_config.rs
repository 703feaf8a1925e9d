//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if one
//! is present).

use serde::Deserialize;
use std::env;

/// Secret used when none is configured in development
const DEV_TOKEN_SECRET: &str = "userhub-development-secret-do-not-deploy";

/// Minimum secret length accepted outside development
const MIN_SECRET_LEN: usize = 32;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub token: TokenConfig,
    pub cors: CorsConfig,
    pub log: LogConfig,
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

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
///
/// `url` is either a `postgres://` URL or `memory://` for the in-process store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.starts_with("memory://")
    }
}

/// Access token configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    pub secret: String,
    #[serde(default = "default_token_ttl")]
    pub ttl_secs: i64,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

// Default value functions
fn default_app_name() -> String {
    "userhub".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    38080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_token_ttl() -> i64 {
    86_400 // 24 hours
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required values are missing or malformed
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match get("APP_ENV") {
            Some(raw) => Environment::parse(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("APP_ENV", raw))?,
            None => default_env(),
        };

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None if env.is_development() => "memory://".to_string(),
            None => return Err(ConfigError::MissingVar("DATABASE_URL")),
        };

        let secret = match get("TOKEN_SECRET") {
            Some(secret) if !env.is_development() && secret.len() < MIN_SECRET_LEN => {
                return Err(ConfigError::InvalidValue(
                    "TOKEN_SECRET",
                    format!("must be at least {MIN_SECRET_LEN} characters"),
                ));
            }
            Some(secret) => secret,
            None if env.is_development() => DEV_TOKEN_SECRET.to_string(),
            None => return Err(ConfigError::MissingVar("TOKEN_SECRET")),
        };

        let format = match get("LOG_FORMAT").as_deref().map(str::to_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | None => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::InvalidValue("LOG_FORMAT", other.to_string()));
            }
        };

        Ok(Self {
            app: AppSettings {
                name: get("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: get("API_HOST").unwrap_or_else(default_host),
                port: parse_or(&get, "API_PORT", default_port)?,
                request_timeout_secs: parse_or(&get, "REQUEST_TIMEOUT_SECS", default_request_timeout)?,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&get, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                acquire_timeout_secs: parse_or(
                    &get,
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    default_acquire_timeout,
                )?,
            },
            token: TokenConfig {
                secret,
                ttl_secs: parse_or(&get, "TOKEN_TTL_SECS", default_token_ttl)?,
            },
            cors: CorsConfig {
                allowed_origins: get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            log: LogConfig {
                level: get("LOG_LEVEL").unwrap_or_else(default_log_level),
                format,
            },
        })
    }
}

/// Parse a numeric setting, falling back to its default when unset
fn parse_or<F, T>(get: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
