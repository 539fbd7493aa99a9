use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::Url;

use crate::form::OPEN_SALARY_MAX;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the service and the form client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub client: ClientConfig,
    pub form: FormConfig,
    pub search: SearchDefaults,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let base_url = env::var("CONFIG_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5001/api".to_string());
        let base_url =
            Url::parse(&base_url).map_err(|_| ConfigError::InvalidUrl { value: base_url })?;
        let timeout_secs: u64 = parse_number("CONFIG_API_TIMEOUT_SECS", 30)?;
        let reset_delay_ms: u64 = parse_number("FORM_RESET_DELAY_MS", 3000)?;

        let preferred_locations = env::var("PREFERRED_LOCATIONS")
            .map(|raw| split_list(&raw))
            .unwrap_or_default();
        let min_salary = parse_number("MIN_SALARY", 0.0)?;
        let max_salary = parse_number("MAX_SALARY", OPEN_SALARY_MAX)?;
        let email_recipient = env::var("EMAIL_RECIPIENT")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            client: ClientConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            form: FormConfig {
                reset_delay: Duration::from_millis(reset_delay_ms),
            },
            search: SearchDefaults {
                preferred_locations,
                min_salary,
                max_salary,
                email_recipient,
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the form submits to and how long a single request may take.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn override_base_url(&mut self, raw: &str) -> Result<(), ConfigError> {
        self.base_url = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidUrl {
            value: raw.to_string(),
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Delay between a successful submission and the form reverting to blank rows.
    pub reset_delay: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            reset_delay: Duration::from_millis(3000),
        }
    }
}

/// Global search preferences reported alongside the stored profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDefaults {
    pub preferred_locations: Vec<String>,
    pub min_salary: f64,
    pub max_salary: f64,
    pub email_recipient: Option<String>,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            preferred_locations: Vec::new(),
            min_salary: 0.0,
            max_salary: OPEN_SALARY_MAX,
            email_recipient: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidUrl {
        value: String,
    },
    InvalidNumber {
        key: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUrl { value, .. } => {
                write!(f, "CONFIG_API_URL '{value}' is not an absolute URL")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a valid number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidUrl { .. }
            | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
