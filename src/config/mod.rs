use crate::infant::DEFAULT_PHOTOTHERAPY_HOURS;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of deployment.
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

/// How evaluation results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub intake: IntakeConfig,
    pub output: OutputFormat,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("BILIGRAM_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("BILIGRAM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let phototherapy_hours = match env::var("BILIGRAM_PHOTOTHERAPY_HOURS") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|hours| hours.is_finite() && *hours > 0.0)
                .ok_or(ConfigError::InvalidPhototherapyHours(raw))?,
            Err(_) => DEFAULT_PHOTOTHERAPY_HOURS,
        };

        let output = match env::var("BILIGRAM_OUTPUT") {
            Ok(raw) => OutputFormat::parse(&raw).ok_or(ConfigError::InvalidOutput(raw))?,
            Err(_) => OutputFormat::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig::for_environment(environment, log_level),
            intake: IntakeConfig { phototherapy_hours },
            output,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Colored output, only for interactive development runs.
    pub ansi: bool,
    pub show_target: bool,
}

impl TelemetryConfig {
    pub fn for_environment(environment: AppEnvironment, log_level: String) -> Self {
        let development = environment == AppEnvironment::Development;
        Self {
            log_level,
            ansi: development,
            show_target: development,
        }
    }
}

/// Assumptions applied while ingesting charted data.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Hours of phototherapy assumed for each charted start time.
    pub phototherapy_hours: f64,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPhototherapyHours(String),
    InvalidOutput(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPhototherapyHours(value) => write!(
                f,
                "BILIGRAM_PHOTOTHERAPY_HOURS must be a positive number of hours (got '{}')",
                value
            ),
            ConfigError::InvalidOutput(value) => {
                write!(f, "BILIGRAM_OUTPUT must be 'text' or 'json' (got '{}')", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
