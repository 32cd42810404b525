use std::env;
use std::fmt;
use std::sync::Arc;

use crate::parking::{ChargeStrategy, DynamicChargeStrategy, FixedChargeStrategy};

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

/// Top-level configuration for the parking service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub charge: ChargeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("PARKING_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("PARKING_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let hourly_rate = match env::var("PARKING_HOURLY_RATE") {
            Ok(raw) => parse_rate(&raw)?,
            Err(_) => FixedChargeStrategy::DEFAULT_HOURLY_RATE,
        };

        let strategy = env::var("PARKING_CHARGE_STRATEGY").unwrap_or_else(|_| "fixed".to_string());
        let charge = match strategy.trim().to_ascii_lowercase().as_str() {
            "fixed" => ChargeConfig::Fixed { hourly_rate },
            "dynamic" => ChargeConfig::Dynamic,
            _ => return Err(ConfigError::UnknownStrategy(strategy)),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            charge,
        })
    }
}

fn parse_rate(raw: &str) -> Result<f64, ConfigError> {
    let rate = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidHourlyRate(raw.to_string()))?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ConfigError::InvalidHourlyRate(raw.to_string()));
    }
    Ok(rate)
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which charge policy the parking system starts with.
#[derive(Debug, Clone, PartialEq)]
pub enum ChargeConfig {
    Fixed { hourly_rate: f64 },
    Dynamic,
}

impl ChargeConfig {
    pub fn build_strategy(&self) -> Arc<dyn ChargeStrategy> {
        match self {
            ChargeConfig::Fixed { hourly_rate } => Arc::new(FixedChargeStrategy::new(*hourly_rate)),
            ChargeConfig::Dynamic => Arc::new(DynamicChargeStrategy::standard()),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    UnknownStrategy(String),
    InvalidHourlyRate(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownStrategy(value) => write!(
                f,
                "PARKING_CHARGE_STRATEGY must be 'fixed' or 'dynamic', got '{}'",
                value
            ),
            ConfigError::InvalidHourlyRate(value) => write!(
                f,
                "PARKING_HOURLY_RATE must be a positive number, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
