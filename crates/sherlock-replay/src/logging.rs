use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_path: Option<PathBuf>,
}

/// Installs the global subscriber. Events go to `log_file` when given, otherwise to
/// stderr so stdout stays clean for the rendered table.
pub fn init_logging(logging: &LoggingConfig, log_file: Option<&Path>) -> Result<LoggingGuard> {
    let (writer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("creating log directory at {}", parent.display())
                })?;
            }
            let file = File::create(path)
                .with_context(|| format!("creating log file at {}", path.display()))?;
            writer_for(file)
        }
        None => writer_for(io::stderr()),
    };

    let level = logging.level().unwrap_or(Level::WARN);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer);

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    if logging.enable_structured {
        let _ = tracing::subscriber::set_global_default(
            builder.json().with_current_span(false).finish(),
        );
    } else {
        let _ = tracing::subscriber::set_global_default(builder.with_ansi(false).finish());
    }

    Ok(LoggingGuard {
        _guard: guard,
        log_path: log_file.map(Path::to_path_buf),
    })
}

fn writer_for<W: io::Write + Send + 'static>(sink: W) -> (NonBlocking, WorkerGuard) {
    non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(sink)
}
