use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Parsing error: {0}")]
    Parsing(String),

    #[error("Tracing subscriber error: {0}")]
    TracingSubscriber(String),
}

impl From<tracing::dispatcher::SetGlobalDefaultError> for LoggerError {
    fn from(e: tracing::dispatcher::SetGlobalDefaultError) -> Self {
        Self::TracingSubscriber(e.to_string())
    }
}
