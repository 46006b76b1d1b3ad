use std::{fmt, sync::Arc};

use tracing::Dispatch;
use tracing_subscriber::{
    fmt::{writer::BoxMakeWriter, MakeWriter},
    layer::SubscriberExt,
    Layer,
};

use crate::{
    caller::caller_fields,
    encoder::{ConsoleEncoder, EncoderConfig, LevelCase},
    field::FieldList,
    terminate::{ProcessExit, Terminator},
    CallerInfo, Field, Level, LoggerConfig,
};

/// Width of a formatted logger name.
const NAME_WIDTH: usize = 20;
/// Characters of the raw name kept when the label overflows.
const NAME_KEEP: usize = 18;

/// Format a logger name as a fixed-width bracketed label.
///
/// `[name]` is right-padded with spaces to 20 characters. When `[name]` is
/// longer than that, the label becomes the first 18 characters of `name`
/// followed by `.]`.
#[must_use]
pub fn format_name(name: &str) -> String {
    let label = format!("[{name}]");
    if label.chars().count() > NAME_WIDTH {
        let kept: String = name.chars().take(NAME_KEEP).collect();
        format!("{kept}.]")
    } else {
        format!("{label:<width$}", width = NAME_WIDTH)
    }
}

/// Emits one event through the current dispatcher. The level of a `tracing`
/// callsite has to be a constant, hence one expansion per level.
macro_rules! emit {
    ($level:expr, $severity:expr, $name:expr, $fields:expr, $message:expr) => {
        tracing::event!(
            target: "selog",
            $level,
            selog.severity = $severity,
            selog.logger = $name,
            selog.fields = $fields,
            "{}",
            $message
        )
    };
}

struct Core {
    dispatch: Dispatch,
    level: Level,
    encoder_config: Arc<EncoderConfig>,
    terminator: Arc<dyn Terminator>,
}

/// A named, field carrying handle on a console logger.
///
/// Cloning is cheap: derived loggers share the dispatch, level and sink of
/// the logger they were derived from.
#[derive(Clone)]
pub struct LogFacade {
    core: Arc<Core>,
    name: String,
    fields: Vec<Field>,
}

impl fmt::Debug for LogFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFacade")
            .field("level", &self.core.level)
            .field("encoder_config", &self.core.encoder_config)
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl LogFacade {
    /// Console logger on stdout.
    ///
    /// `level` accepts `"debug"` or `"info"`; anything else, or `None`, means
    /// debug. Unlike [`new_std_logger`](crate::new_std_logger), the
    /// process-wide default logger is left untouched.
    #[must_use]
    pub fn new_std(level: Option<&str>) -> Self {
        Self::builder().level(Level::from_selector(level)).build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Console logger on stdout configured from a [`LoggerConfig`].
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        let level = config
            .level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(Level::Debug);
        let mut encoder_config = EncoderConfig::general();
        if let Some(time_layout) = &config.time_layout {
            encoder_config = encoder_config.with_time_layout(time_layout.as_str());
        }
        if config.lowercase_level {
            encoder_config = encoder_config.with_level_case(LevelCase::Lower);
        }
        let mut builder = Self::builder()
            .level(level)
            .encoder_config(encoder_config);
        if let Some(name) = &config.name {
            builder = builder.name(name);
        }
        builder.build()
    }

    /// Minimum level of the records this logger writes.
    #[must_use]
    pub fn level(&self) -> Level {
        self.core.level
    }

    /// Formatted name label, empty for an unnamed logger.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields attached with [`with`](Self::with).
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn encoder_config(&self) -> &EncoderConfig {
        &self.core.encoder_config
    }

    /// The `tracing` dispatcher records are written through.
    #[must_use]
    pub fn dispatch(&self) -> &Dispatch {
        &self.core.dispatch
    }

    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.core.level
    }

    /// Derive a logger whose records carry the formatted `name`.
    ///
    /// Naming an already named logger joins both labels with a `.`.
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        let label = format_name(name);
        let name = if self.name.is_empty() {
            label
        } else {
            format!("{}.{label}", self.name)
        };
        Self {
            core: Arc::clone(&self.core),
            name,
            fields: self.fields.clone(),
        }
    }

    /// Derive a logger whose records always carry `fields`, ahead of any per
    /// call field.
    #[must_use]
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut attached = self.fields.clone();
        attached.extend(fields);
        Self {
            core: Arc::clone(&self.core),
            name: self.name.clone(),
            fields: attached,
        }
    }

    /// Write `message` at `level` with extra `fields`.
    ///
    /// This only writes: `Fatal` and `Panic` records do not terminate here.
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }
        let rendered = FieldList(&[self.fields.as_slice(), fields]).to_string();
        let fields = rendered.as_str();
        let name = self.name.as_str();
        let severity = level.as_str();
        tracing::dispatcher::with_default(&self.core.dispatch, || match level {
            Level::Debug => emit!(tracing::Level::DEBUG, severity, name, fields, message),
            Level::Info => emit!(tracing::Level::INFO, severity, name, fields, message),
            Level::Warn => emit!(tracing::Level::WARN, severity, name, fields, message),
            Level::Error | Level::Fatal | Level::Panic => {
                emit!(tracing::Level::ERROR, severity, name, fields, message);
            }
        });
    }

    fn log_args(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.log(level, &args.to_string(), &[]);
        }
    }

    fn log_caller(&self, level: Level, caller: Option<&CallerInfo>, message: &str) {
        self.log(level, message, &caller_fields(caller));
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message, &[]);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message, &[]);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message, &[]);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message, &[]);
    }

    /// Write a `FATAL` record, then hand over to the terminator, which exits
    /// the process by default.
    pub fn fatal(&self, message: &str) -> ! {
        self.log(Level::Fatal, message, &[]);
        self.core.terminator.fatal(message)
    }

    /// Write a `PANIC` record, then panic with `message`.
    pub fn panic(&self, message: &str) -> ! {
        self.log(Level::Panic, message, &[]);
        self.core.terminator.panic(message)
    }

    /// `logger.debugf(format_args!("{} items", n))`
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_args(Level::Debug, args);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_args(Level::Info, args);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log_args(Level::Warn, args);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_args(Level::Error, args);
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(&args.to_string())
    }

    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.panic(&args.to_string())
    }

    /// Write a debug record tagged with `func`, `file` and `line`.
    ///
    /// `caller` is normally produced by [`caller_info!`](crate::caller_info);
    /// the [`debugt!`](crate::debugt) macro does both. A `None` caller writes
    /// the record without the three fields.
    pub fn debugt(&self, caller: Option<CallerInfo>, message: &str) {
        self.log_caller(Level::Debug, caller.as_ref(), message);
    }

    pub fn infot(&self, caller: Option<CallerInfo>, message: &str) {
        self.log_caller(Level::Info, caller.as_ref(), message);
    }

    pub fn warnt(&self, caller: Option<CallerInfo>, message: &str) {
        self.log_caller(Level::Warn, caller.as_ref(), message);
    }

    pub fn errort(&self, caller: Option<CallerInfo>, message: &str) {
        self.log_caller(Level::Error, caller.as_ref(), message);
    }

    pub fn fatalt(&self, caller: Option<CallerInfo>, message: &str) -> ! {
        self.log_caller(Level::Fatal, caller.as_ref(), message);
        self.core.terminator.fatal(message)
    }

    pub fn panict(&self, caller: Option<CallerInfo>, message: &str) -> ! {
        self.log_caller(Level::Panic, caller.as_ref(), message);
        self.core.terminator.panic(message)
    }
}

/// Builds a [`LogFacade`].
///
/// Defaults: debug level, [`EncoderConfig::general`], stdout, [`ProcessExit`].
pub struct LoggerBuilder {
    level: Level,
    encoder_config: EncoderConfig,
    writer: Option<BoxMakeWriter>,
    terminator: Arc<dyn Terminator>,
    name: Option<String>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            encoder_config: EncoderConfig::general(),
            writer: None,
            terminator: Arc::new(ProcessExit),
            name: None,
        }
    }
}

impl LoggerBuilder {
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn encoder_config(mut self, encoder_config: EncoderConfig) -> Self {
        self.encoder_config = encoder_config;
        self
    }

    /// Sink the records are written to instead of stdout.
    #[must_use]
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    #[must_use]
    pub fn terminator(mut self, terminator: impl Terminator + 'static) -> Self {
        self.terminator = Arc::new(terminator);
        self
    }

    /// Name of the built logger, formatted as by [`LogFacade::named`].
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    #[must_use]
    pub fn build(self) -> LogFacade {
        let encoder_config = Arc::new(self.encoder_config);
        let writer = self
            .writer
            .unwrap_or_else(|| BoxMakeWriter::new(std::io::stdout));
        let console_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .event_format(ConsoleEncoder::new(Arc::clone(&encoder_config)))
            .with_filter(self.level.level_filter());
        let dispatch = Dispatch::new(tracing_subscriber::registry().with(console_layer));

        let logger = LogFacade {
            core: Arc::new(Core {
                dispatch,
                level: self.level,
                encoder_config,
                terminator: self.terminator,
            }),
            name: String::new(),
            fields: Vec::new(),
        };
        match self.name {
            Some(name) => logger.named(&name),
            None => logger,
        }
    }
}
