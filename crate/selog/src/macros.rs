/// Capture the call site as an `Option<CallerInfo>`.
///
/// The function name is read from the type name of a closure defined at the
/// call site, so it names the enclosing function (closure frames skipped).
#[macro_export]
macro_rules! caller_info {
    () => {
        $crate::CallerInfo::resolve(
            ::core::option::Option::Some(::std::any::type_name_of_val(&|| {})),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_t {
    ($method:ident, $level:expr, $logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.enabled($level) {
            logger.$method($crate::caller_info!(), &::std::format!($($arg)+));
        }
    }};
}

/// Debug record tagged with the call site
///
/// ```ignore
/// selog::debugt!(logger, "cache miss for {}", key);
/// ```
#[macro_export]
macro_rules! debugt {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_t!(debugt, $crate::Level::Debug, $logger, $($arg)+)
    };
}

/// Info record tagged with the call site
#[macro_export]
macro_rules! infot {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_t!(infot, $crate::Level::Info, $logger, $($arg)+)
    };
}

/// Warn record tagged with the call site
#[macro_export]
macro_rules! warnt {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_t!(warnt, $crate::Level::Warn, $logger, $($arg)+)
    };
}

/// Error record tagged with the call site
#[macro_export]
macro_rules! errort {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_t!(errort, $crate::Level::Error, $logger, $($arg)+)
    };
}

/// Fatal record tagged with the call site, then terminate
#[macro_export]
macro_rules! fatalt {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalt($crate::caller_info!(), &::std::format!($($arg)+))
    };
}

/// Panic record tagged with the call site, then panic
#[macro_export]
macro_rules! panict {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panict($crate::caller_info!(), &::std::format!($($arg)+))
    };
}

/// Info record on the process-wide default logger, with optional fields
/// followed by the call site fields
///
/// ```ignore
/// selog::infoc!("user logged in", Field::string("user", name), Field::int("attempt", 2));
/// ```
#[macro_export]
macro_rules! infoc {
    ($message:expr $(, $field:expr)* $(,)?) => {
        $crate::infoc(
            ::core::convert::AsRef::<str>::as_ref(&$message),
            ::std::vec![$($field),*],
            $crate::caller_info!(),
        )
    };
}

/// Debug record on the process-wide default logger
#[macro_export]
macro_rules! debugc {
    ($message:expr $(, $field:expr)* $(,)?) => {
        $crate::debugc(
            ::core::convert::AsRef::<str>::as_ref(&$message),
            ::std::vec![$($field),*],
            $crate::caller_info!(),
        )
    };
}

/// Error record on the process-wide default logger
#[macro_export]
macro_rules! errorc {
    ($message:expr $(, $field:expr)* $(,)?) => {
        $crate::errorc(
            ::core::convert::AsRef::<str>::as_ref(&$message),
            ::std::vec![$($field),*],
            $crate::caller_info!(),
        )
    };
}

/// Warn record on the process-wide default logger
#[macro_export]
macro_rules! warnc {
    ($message:expr $(, $field:expr)* $(,)?) => {
        $crate::warnc(
            ::core::convert::AsRef::<str>::as_ref(&$message),
            ::std::vec![$($field),*],
            $crate::caller_info!(),
        )
    };
}
