//! Deployment environment and logging configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Deployment environment, read from `ENVIRONMENT`, `ENV` or `RUST_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    /// Also selected by `test`
    Staging,
    Production,
}

impl Environment {
    /// Detect the environment, falling back to development
    pub fn from_env() -> Self {
        ["ENVIRONMENT", "ENV", "RUST_ENV"]
            .iter()
            .find_map(|key| env::var(key).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Environment-specific dotenv file, e.g. `.env.production`
    pub fn env_file(&self) -> String {
        format!(".env.{}", self)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive, e.g. `info` or `ts_core=debug`
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// ANSI colors in terminal output
    #[serde(default)]
    pub colored: bool,

    /// Include file and line in events
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Logging defaults for an environment
    ///
    /// Development logs verbosely in a readable form. Deployed builds log
    /// JSON without colors.
    pub fn for_environment(env: Environment) -> Self {
        let (level, format) = match env {
            Environment::Development => ("debug", LogFormat::Pretty),
            Environment::Staging => ("info", LogFormat::Json),
            Environment::Production => ("warn", LogFormat::Json),
        };
        let local = env == Environment::Development;
        Self {
            level: level.to_string(),
            format,
            colored: local,
            source_location: local,
        }
    }

    /// Apply `LOG_LEVEL` and `LOG_FORMAT` when set
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(level) = env::var("LOG_LEVEL").ok().filter(|l| !l.trim().is_empty()) {
            self.level = level;
        }
        if let Some(format) = env::var("LOG_FORMAT").ok().and_then(|f| f.parse().ok()) {
            self.format = format;
        }
        self
    }
}

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!(" PROD ".parse::<Environment>().unwrap(), Environment::Production);
        assert!("invalid".parse::<Environment>().is_err());
    }

    #[test]
    fn test_env_file_follows_name() {
        assert_eq!(Environment::Development.env_file(), ".env.development");
        assert_eq!(Environment::Production.env_file(), ".env.production");
    }

    #[test]
    fn test_logging_config_for_environment() {
        let dev_log = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev_log.level, "debug");
        assert_eq!(dev_log.format, LogFormat::Pretty);
        assert!(dev_log.colored && dev_log.source_location);

        let staging_log = LoggingConfig::for_environment(Environment::Staging);
        assert_eq!(staging_log.level, "info");
        assert_eq!(staging_log.format, LogFormat::Json);

        let prod_log = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod_log.level, "warn");
        assert!(!prod_log.colored && !prod_log.source_location);
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
