use std::{fmt, sync::Arc};

use tracing::{
    field::{Field as TracingField, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{
    fmt::{
        format::Writer,
        time::{ChronoLocal, FormatTime},
        FmtContext, FormatEvent, FormatFields,
    },
    registry::LookupSpan,
};

use crate::{field::needs_quoting, Field, FieldValue};

/// Reserved event fields the facade uses to hand its own state to the encoder.
pub(crate) const SEVERITY_FIELD: &str = "selog.severity";
pub(crate) const LOGGER_FIELD: &str = "selog.logger";
pub(crate) const FIELDS_FIELD: &str = "selog.fields";

/// `2006-01-02 15:04:05.000`
pub const DEFAULT_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelCase {
    #[default]
    Upper,
    Lower,
}

/// Layout options of the console encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    time_layout: String,
    level_case: LevelCase,
}

impl EncoderConfig {
    /// Millisecond timestamps and uppercase levels.
    #[must_use]
    pub fn general() -> Self {
        Self {
            time_layout: DEFAULT_TIME_LAYOUT.to_owned(),
            level_case: LevelCase::Upper,
        }
    }

    /// `time_layout` uses `chrono` strftime syntax.
    #[must_use]
    pub fn with_time_layout(mut self, time_layout: impl Into<String>) -> Self {
        self.time_layout = time_layout.into();
        self
    }

    #[must_use]
    pub fn with_level_case(mut self, level_case: LevelCase) -> Self {
        self.level_case = level_case;
        self
    }

    #[must_use]
    pub fn time_layout(&self) -> &str {
        &self.time_layout
    }

    #[must_use]
    pub const fn level_case(&self) -> LevelCase {
        self.level_case
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::general()
    }
}

/// Tab separated console layout:
/// `time  LEVEL  [name]  message  key=value ...`
pub struct ConsoleEncoder {
    config: Arc<EncoderConfig>,
    timer: ChronoLocal,
}

impl ConsoleEncoder {
    #[must_use]
    pub fn new(config: Arc<EncoderConfig>) -> Self {
        let timer = ChronoLocal::new(config.time_layout.clone());
        Self { config, timer }
    }

    #[must_use]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn level_label(&self, label: &str) -> String {
        match self.config.level_case {
            LevelCase::Upper => label.to_ascii_uppercase(),
            LevelCase::Lower => label.to_ascii_lowercase(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleEncoder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut record = RecordVisitor::default();
        event.record(&mut record);

        self.timer.format_time(&mut writer)?;

        let label = record
            .severity
            .as_deref()
            .unwrap_or_else(|| event.metadata().level().as_str());
        write!(writer, "\t{}", self.level_label(label))?;

        if let Some(name) = record.logger.as_deref().filter(|n| !n.is_empty()) {
            write!(writer, "\t{name}")?;
        }

        write!(writer, "\t{}", record.message)?;

        let rendered: Vec<String> = record
            .attached
            .into_iter()
            .filter(|f| !f.is_empty())
            .chain(record.extra)
            .collect();
        if !rendered.is_empty() {
            write!(writer, "\t{}", rendered.join(" "))?;
        }

        writeln!(writer)
    }
}

/// Splits an event into message, facade state and any foreign fields.
#[derive(Default)]
struct RecordVisitor {
    message: String,
    severity: Option<String>,
    logger: Option<String>,
    attached: Option<String>,
    extra: Vec<String>,
}

impl RecordVisitor {
    fn push(&mut self, field: &TracingField, value: FieldValue) {
        self.extra.push(Field::new(field.name(), value).to_string());
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        match field.name() {
            "message" => self.message = value.to_owned(),
            SEVERITY_FIELD => self.severity = Some(value.to_owned()),
            LOGGER_FIELD => self.logger = Some(value.to_owned()),
            FIELDS_FIELD => self.attached = Some(value.to_owned()),
            _ => self.push(field, FieldValue::Str(value.to_owned())),
        }
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, FieldValue::Int(value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, FieldValue::Uint(value));
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, FieldValue::Float(value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, FieldValue::Bool(value));
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
            return;
        }
        let value = format!("{value:?}");
        if needs_quoting(&value) {
            self.extra.push(format!("{}={value:?}", field.name()));
        } else {
            self.extra.push(format!("{}={value}", field.name()));
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::tests::TestWriter;

    fn capture(config: EncoderConfig, emit: impl FnOnce()) -> String {
        let writer = TestWriter::new();
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer.clone())
            .event_format(ConsoleEncoder::new(Arc::new(config)));
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, emit);
        writer.get_output()
    }

    #[test]
    fn test_general_config() {
        let config = EncoderConfig::general();
        assert_eq!(config.time_layout(), DEFAULT_TIME_LAYOUT);
        assert_eq!(config.level_case(), LevelCase::Upper);
        assert_eq!(config, EncoderConfig::default());
    }

    #[test]
    fn test_foreign_event_layout() {
        let output = capture(EncoderConfig::general(), || {
            tracing::warn!(user = "bob", attempts = 3_u64, ok = false, "login refused");
        });
        let columns: Vec<&str> = output.trim_end().split('\t').collect();
        assert_eq!(columns.len(), 4, "{output:?}");
        chrono::NaiveDateTime::parse_from_str(columns[0], DEFAULT_TIME_LAYOUT).unwrap();
        assert_eq!(columns[1], "WARN");
        assert_eq!(columns[2], "login refused");
        assert_eq!(columns[3], "user=bob attempts=3 ok=false");
    }

    #[test]
    fn test_facade_fields_are_unpacked() {
        let output = capture(EncoderConfig::general(), || {
            tracing::error!(
                selog.severity = "FATAL",
                selog.logger = "[db]                ",
                selog.fields = "pool=main",
                "{}",
                "connection lost"
            );
        });
        assert_eq!(
            output.split_once('\t').unwrap().1,
            "FATAL\t[db]                \tconnection lost\tpool=main\n"
        );
    }

    #[test]
    fn test_empty_name_and_fields_are_omitted() {
        let output = capture(EncoderConfig::general(), || {
            tracing::info!(selog.severity = "INFO", selog.logger = "", selog.fields = "", "bare");
        });
        assert_eq!(output.split_once('\t').unwrap().1, "INFO\tbare\n");
    }

    #[test]
    fn test_lowercase_levels_and_custom_layout() {
        let config = EncoderConfig::general()
            .with_time_layout("%H:%M:%S")
            .with_level_case(LevelCase::Lower);
        let output = capture(config, || tracing::info!("hello"));
        let columns: Vec<&str> = output.trim_end().split('\t').collect();
        chrono::NaiveTime::parse_from_str(columns[0], "%H:%M:%S").unwrap();
        assert_eq!(columns[1..], ["info", "hello"]);
    }
}
