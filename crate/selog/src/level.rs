use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use crate::LoggerError;

/// Severity of a record, in ascending order.
///
/// `Fatal` and `Panic` are emitted as `ERROR` events to the underlying
/// `tracing` engine; the encoder still prints their own label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Level {
    /// Resolve the level selector accepted by the std constructors.
    ///
    /// Only `"debug"` and `"info"` are recognized, anything else (or nothing)
    /// falls back to `Debug`.
    #[must_use]
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("info") => Self::Info,
            _ => Self::Debug,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Panic => "PANIC",
        }
    }

    /// The `tracing` level this severity is dispatched at.
    #[must_use]
    pub const fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error | Self::Fatal | Self::Panic => tracing::Level::ERROR,
        }
    }

    pub(crate) fn level_filter(self) -> LevelFilter {
        LevelFilter::from_level(self.as_tracing())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "panic" => Ok(Self::Panic),
            other => Err(LoggerError::Parsing(format!("unknown log level: {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_fallback() {
        assert_eq!(Level::from_selector(None), Level::Debug);
        assert_eq!(Level::from_selector(Some("debug")), Level::Debug);
        assert_eq!(Level::from_selector(Some("info")), Level::Info);
        // only the two documented selectors are honored
        assert_eq!(Level::from_selector(Some("warn")), Level::Debug);
        assert_eq!(Level::from_selector(Some("INFO")), Level::Debug);
        assert_eq!(Level::from_selector(Some("")), Level::Debug);
    }

    #[test]
    fn test_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Panic);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("PANIC".parse::<Level>().unwrap(), Level::Panic);
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(matches!(err, LoggerError::Parsing(_)));
    }

    #[test]
    fn test_tracing_mapping() {
        assert_eq!(Level::Fatal.as_tracing(), tracing::Level::ERROR);
        assert_eq!(Level::Panic.level_filter(), LevelFilter::ERROR);
        assert_eq!(Level::Info.level_filter(), LevelFilter::INFO);
    }
}
