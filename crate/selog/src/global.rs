//! The process-wide default logger and the free functions logging through it.

use std::sync::{OnceLock, PoisonError, RwLock};

use crate::{caller::caller_fields, CallerInfo, Field, Level, LogFacade};

static DEFAULT_LOGGER: OnceLock<RwLock<LogFacade>> = OnceLock::new();

/// The slot is filled with a debug level stdout logger on first access, from
/// whichever thread gets there first.
fn slot() -> &'static RwLock<LogFacade> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(LogFacade::new_std(None)))
}

/// A handle on the current process-wide default logger.
///
/// Never fails: if nothing installed a logger yet, a debug level stdout
/// logger is created.
#[must_use]
pub fn default_logger() -> LogFacade {
    slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide default logger, returning the previous one.
///
/// Handles obtained earlier from [`default_logger`] keep writing through the
/// logger they were cloned from.
pub fn set_default_logger(logger: LogFacade) -> LogFacade {
    let mut current = slot().write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *current, logger)
}

/// Build a stdout logger and make it the process-wide default.
///
/// `level` is `"debug"` or `"info"`; anything else means debug.
pub fn new_std_logger(level: Option<&str>) -> LogFacade {
    let logger = LogFacade::new_std(level);
    set_default_logger(logger.clone());
    logger
}

fn log_default(level: Level, message: &str, mut fields: Vec<Field>, caller: Option<CallerInfo>) {
    fields.extend(caller_fields(caller.as_ref()));
    default_logger().log(level, message, &fields);
}

/// Info record on the default logger, `fields` followed by the caller fields.
/// See the [`infoc!`](crate::infoc) macro.
pub fn infoc(message: &str, fields: Vec<Field>, caller: Option<CallerInfo>) {
    log_default(Level::Info, message, fields, caller);
}

pub fn debugc(message: &str, fields: Vec<Field>, caller: Option<CallerInfo>) {
    log_default(Level::Debug, message, fields, caller);
}

pub fn errorc(message: &str, fields: Vec<Field>, caller: Option<CallerInfo>) {
    log_default(Level::Error, message, fields, caller);
}

pub fn warnc(message: &str, fields: Vec<Field>, caller: Option<CallerInfo>) {
    log_default(Level::Warn, message, fields, caller);
}
