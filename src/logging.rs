use crate::nice_display::NiceDisplay;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "revnix-chat.log";

#[derive(Debug)]
pub enum Error {
    CreateLogDir(std::io::Error),
    Init(String),
}

impl NiceDisplay for Error {
    fn message(&self) -> String {
        match self {
            Error::CreateLogDir(err) => {
                format!("Failed to create logs directory\n{}", err.message())
            }
            Error::Init(err) => format!("Failed to initialize logging: {}", err),
        }
    }
}

/// Logs go to stderr and to a daily rolling file in `log_dir`. The returned
/// guard flushes the file writer when dropped, so hold it until exit.
pub fn init(log_dir: &Path) -> Result<WorkerGuard, Error> {
    if !log_dir.is_dir() {
        std::fs::create_dir_all(log_dir).map_err(Error::CreateLogDir)?;
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|err| Error::Init(err.to_string()))?;

    Ok(guard)
}
