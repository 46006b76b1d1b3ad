use serde::{Deserialize, Serialize};

/// Logger settings an application can embed in its own configuration file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level: `debug`, `info`, `warn`, `error`, `fatal` or `panic`.
    /// Missing or unknown values mean `debug`.
    pub level: Option<String>,

    /// Name of the root logger, formatted as a fixed-width label.
    pub name: Option<String>,

    /// `chrono` strftime layout of the timestamp column.
    /// Defaults to `%Y-%m-%d %H:%M:%S%.3f`.
    pub time_layout: Option<String>,

    /// Print `info` rather than `INFO`.
    pub lowercase_level: bool,
}
