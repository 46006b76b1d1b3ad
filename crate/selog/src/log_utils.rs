use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Dispatch;

use crate::{default_logger, set_default_logger, LogFacade, LoggerError};

static TRACING_SET: AtomicBool = AtomicBool::new(false);

/// Initialize the stdout logger and route every `tracing` event through it.
///
/// # Arguments
/// * `level` - `"debug"` or `"info"`, anything else means debug
///
/// # Notes
/// - the logger also becomes the process-wide default used by `infoc` and
///   friends
/// - only the first call installs anything; later calls log a warning
/// - failures are printed to stderr, the caller is never interrupted
pub fn log_init(level: Option<&str>) {
    if let Err(err) = try_log_init(level) {
        eprintln!("Failed to initialize logging: {err:?}");
    }
}

/// Same as [`log_init`], reporting failures to the caller.
///
/// # Errors
/// Returns an error if another global `tracing` dispatcher was already set.
pub fn try_log_init(level: Option<&str>) -> Result<(), LoggerError> {
    if TRACING_SET.swap(true, Ordering::Acquire) {
        default_logger().warn("Logging already initialized");
        return Ok(());
    }

    install(LogFacade::new_std(level), |dispatch| {
        tracing::dispatcher::set_global_default(dispatch).map_err(LoggerError::from)
    })
    .inspect_err(|_| TRACING_SET.store(false, Ordering::Release))
}

/// Hand `logger` to `set_global`, then make it the default logger.
///
/// The default logger is only replaced once the global install succeeded.
fn install<F>(logger: LogFacade, set_global: F) -> Result<(), LoggerError>
where
    F: FnOnce(Dispatch) -> Result<(), LoggerError>,
{
    set_global(logger.dispatch().clone())?;
    set_default_logger(logger.clone());
    logger.debugf(format_args!("Logging initialized at level {}", logger.level()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{format_name, tests::lock_default_logger, Level};

    #[test]
    fn test_log_init() {
        let _guard = lock_default_logger();
        log_init(Some("info"));
        assert_eq!(default_logger().level(), Level::Info);
        tracing::info!("This is an INFO test log message");
        // The next message is below the INFO level and should be ignored
        tracing::debug!("This is a DEBUG test log message");

        // a second initialization only warns
        try_log_init(Some("debug")).unwrap();
        assert_eq!(default_logger().level(), Level::Info);
    }

    #[test]
    fn test_failed_install_keeps_default_logger() {
        let _guard = lock_default_logger();
        let current = LogFacade::builder().level(Level::Warn).name("current").build();
        let previous = set_default_logger(current);

        let err = install(LogFacade::new_std(Some("info")), |_| {
            Err(LoggerError::TracingSubscriber(
                "a global default trace dispatcher has already been set".to_owned(),
            ))
        })
        .unwrap_err();
        assert!(matches!(err, LoggerError::TracingSubscriber(_)));

        let after = set_default_logger(previous);
        assert_eq!(after.level(), Level::Warn);
        assert_eq!(after.name(), format_name("current"));
    }

    #[test]
    fn test_successful_install_sets_default_logger() {
        let _guard = lock_default_logger();
        let previous = default_logger();

        let mut installed = None;
        install(LogFacade::new_std(Some("info")), |dispatch| {
            installed = Some(dispatch);
            Ok(())
        })
        .unwrap();
        assert!(installed.is_some());

        let after = set_default_logger(previous);
        assert_eq!(after.level(), Level::Info);
    }
}
