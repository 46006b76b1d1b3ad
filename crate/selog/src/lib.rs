//! # selog
//!
//! A structured logging facade over `tracing`.
//!
//! - [`LogFacade`] writes console records
//!   `time  LEVEL  [name]  message  key=value ...` to stdout, or to any
//!   `MakeWriter` given to [`LoggerBuilder::writer`]
//! - [`LogFacade::named`] and [`LogFacade::with`] derive loggers carrying a
//!   fixed-width name label or attached [`Field`]s
//! - the `*t` methods and macros ([`infot!`], ...) tag records with the
//!   `func`, `file` and `line` of the call site
//! - the `*c` functions and macros ([`infoc!`], ...) log through a
//!   process-wide default logger, see [`default_logger`]
//!
//! ```ignore
//! use selog::{Field, LogFacade};
//!
//! let logger = LogFacade::new_std(Some("info")).named("gateway");
//! let conn = logger.with([Field::string("peer", "10.0.0.7")]);
//! conn.info("accepted");
//! selog::warnt!(conn, "slow handshake: {} ms", 250);
//! selog::infoc!("shutting down", Field::int("open_connections", 0));
//! ```
//!
//! [`log_init`] additionally installs the default logger as the global
//! `tracing` dispatcher, so `tracing::info!` calls from dependencies share the
//! same layout.
mod caller;
mod config;
mod encoder;
mod error;
mod facade;
mod field;
mod global;
mod level;
mod log_utils;
mod macros;
mod terminate;

pub use caller::CallerInfo;
pub use config::LoggerConfig;
pub use encoder::{ConsoleEncoder, EncoderConfig, LevelCase, DEFAULT_TIME_LAYOUT};
pub use error::LoggerError;
pub use facade::{format_name, LogFacade, LoggerBuilder};
pub use field::{Field, FieldValue};
pub use global::{
    debugc, default_logger, errorc, infoc, new_std_logger, set_default_logger, warnc,
};
pub use level::Level;
pub use log_utils::{log_init, try_log_init};
pub use terminate::{ProcessExit, Terminator};
