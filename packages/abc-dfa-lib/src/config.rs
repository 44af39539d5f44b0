use std::{fmt::Display, str::FromStr};

use abc_dfa_macros::config;
use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

/// Resolves an optional, partially specified value against a fallback.
/// Implemented for plain options here and for every `Partial*` config struct
/// by the `config!` macro.
pub trait Fallback<T> {
    fn or_fallback(self, fallback: T) -> T;
}

impl<T> Fallback<Option<T>> for Option<T> {
    fn or_fallback(self, fallback: Option<T>) -> Option<T> {
        self.or(fallback)
    }
}

impl<T> Fallback<T> for Option<T> {
    fn or_fallback(self, fallback: T) -> T {
        self.unwrap_or(fallback)
    }
}

pub trait GeneralConfig {
    fn logger(&self) -> &LoggerConfig;
}

config! {
    pub struct LoggerConfig {
        enabled: bool = false,
        log_file: bool = false,
        log_level: LogLevel = LogLevel::Warn,
    }
}

/// How the verdict of a recognition run is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The bare `true` / `false`.
    Plain,
    /// A pretty printed JSON document with status and statistics.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

config! {
    pub struct RecognizerConfig {
        /// Emit one trace block per consumed character plus a verdict line.
        trace: bool = false,
        /// Terminate the printed verdict with a newline.
        trailing_newline: bool = false,
        output: OutputFormat = OutputFormat::Plain,
        logger: LoggerConfig (Option<PartialLoggerConfig> = LoggerConfig::default()),
    }
}

impl GeneralConfig for RecognizerConfig {
    fn logger(&self) -> &LoggerConfig {
        &self.logger
    }
}
