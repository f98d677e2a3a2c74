//! Service configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, once at startup. Nothing reads the environment afterwards.

use std::env;
use std::net::IpAddr;

use sepa_core::CurrencyRegistry;
use tracing::level_filters::LevelFilter;

/// Log verbosity, ordered `None < Error < Warning < Info < Debug`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    None,
    Error,
    Warning,
    Info,
    #[default]
    Debug,
}

impl LogLevel {
    /// Parses a level name case-insensitively.
    ///
    /// Unknown or empty names fall back to `Debug`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "NONE" => LogLevel::None,
            "ERROR" => LogLevel::Error,
            "WARNING" | "WARN" => LogLevel::Warning,
            "INFO" => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::None => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind address
    pub host: IpAddr,

    /// HTTP port
    pub port: u16,

    /// Maximum log level written
    pub log_level: LogLevel,

    /// Redact sensitive values in log output
    pub anonymize: bool,

    /// Replacement allowed-currency list, `None` keeps the built-in list
    pub allowed_currencies: Option<Vec<String>>,

    /// Default currency, `None` keeps EUR
    pub default_currency: Option<String>,

    /// Minimum edge of generated QR codes in pixels
    pub qr_size: u32,

    /// Edge of error-message images in pixels
    pub error_image_size: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            log_level: LogLevel::Debug,
            anonymize: true,
            allowed_currencies: None,
            default_currency: None,
            qr_size: 256,
            error_image_size: 200,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServiceConfig::default();
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let config = ServiceConfig {
            host: parse_or(var("HOST"), "HOST", defaults.host)?,

            port: parse_or(var("PORT"), "PORT", defaults.port)?,

            log_level: var("LOG_LEVEL")
                .map(|v| LogLevel::parse(&v))
                .unwrap_or(defaults.log_level),

            // Only the literal "false" turns redaction off
            anonymize: var("ANONYMIZE").map_or(true, |v| v != "false"),

            allowed_currencies: var("ALLOWED_CURRENCIES").map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            }),

            default_currency: var("DEFAULT_CURRENCY").map(|v| v.trim().to_string()),

            qr_size: parse_or(var("QR_SIZE"), "QR_SIZE", defaults.qr_size)?,

            error_image_size: parse_or(
                var("ERROR_IMAGE_SIZE"),
                "ERROR_IMAGE_SIZE",
                defaults.error_image_size,
            )?,
        };

        if config.qr_size == 0 {
            return Err(ConfigError::InvalidValue("QR_SIZE".to_string()));
        }
        if config.error_image_size < 40 {
            return Err(ConfigError::InvalidValue("ERROR_IMAGE_SIZE".to_string()));
        }

        Ok(config)
    }

    /// Builds the currency registry this configuration describes.
    ///
    /// The allowed list is applied before the default, so a default outside
    /// the configured list falls back to EUR.
    pub fn currency_registry(&self) -> CurrencyRegistry {
        let registry = CurrencyRegistry::new();
        if let Some(allowed) = &self.allowed_currencies {
            registry.set_allowed_currencies(allowed.iter().cloned());
        }
        if let Some(default) = &self.default_currency {
            registry.set_default_currency(default);
        }
        registry
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
