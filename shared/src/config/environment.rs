//! Deployment selection and logging settings of the verification client

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Backend deployment the client is pointed at
///
/// Picks the dotenv file loaded at startup and the logging defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Developer machine against a local or shared test backend
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    /// Read `OTP_ENV`; a missing or unknown value means `Local`
    pub fn from_env() -> Self {
        env::var("OTP_ENV")
            .ok()
            .and_then(|name| Self::from_name(&name))
            .unwrap_or_default()
    }

    /// Parse a deployment name (`local`/`dev`, `staging`, `production`/`prod`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" | "dev" | "development" => Some(Environment::Local),
            "staging" => Some(Environment::Staging),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Dotenv file holding this deployment's settings, e.g. `.env.staging`
    pub fn env_file(&self) -> String {
        format!(".env.{}", self.as_str())
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" => Some(LogFormat::Pretty),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `otp_core=debug,otp_infra=info`
    pub level: String,

    pub format: LogFormat,

    /// Append to this file instead of writing to stdout
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// ANSI colours; ignored when logging to a file
    #[serde(default)]
    pub colored: bool,

    /// Include file and line of each event
    #[serde(default)]
    pub source_location: bool,
}

impl LoggingConfig {
    /// Defaults for `environment`
    ///
    /// Local runs log readable, coloured debug output to the terminal;
    /// deployed clients write JSON to `logs/carhub-verify-<env>.log`.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Local => Self {
                level: String::from("debug"),
                format: LogFormat::Pretty,
                file: None,
                colored: true,
                source_location: true,
            },
            Environment::Staging | Environment::Production => Self {
                level: String::from(if environment == Environment::Production {
                    "warn"
                } else {
                    "info"
                }),
                format: LogFormat::Json,
                file: Some(default_log_file(environment)),
                colored: false,
                source_location: false,
            },
        }
    }

    /// Defaults for `environment` with `LOG_LEVEL`, `LOG_FORMAT` and
    /// `LOG_FILE` applied on top
    pub fn from_env(environment: Environment) -> Self {
        let mut config = Self::for_environment(environment);
        if let Ok(level) = env::var("LOG_LEVEL") {
            config.level = level;
        }
        if let Some(format) = env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| LogFormat::from_name(&v))
        {
            config.format = format;
        }
        if let Ok(path) = env::var("LOG_FILE") {
            config.file = Some(PathBuf::from(path)).filter(|p| !p.as_os_str().is_empty());
        }
        config
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

fn default_log_file(environment: Environment) -> PathBuf {
    PathBuf::from(format!("logs/carhub-verify-{}.log", environment.as_str()))
}
