use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service logs at info, request spans from tower-http, and only sqlx
/// warnings (its per-statement logs are noisy at info).
pub const DEFAULT_LOG_FILTER: &str = "lexideck_backend=info,tower_http=info,sqlx=warn,warn";
const LOG_FILE_PREFIX: &str = "lexideck.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    /// Directory for the daily rolling file; `None` logs to stdout only.
    pub file_dir: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        let filter = std::env::var("RUST_LOG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let file_dir = crate::config::env_bool("ENABLE_FILE_LOGS")
            .unwrap_or(false)
            .then(|| PathBuf::from(std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string())));

        Self { filter, file_dir }
    }
}

/// Keeps the non-blocking file writer alive; dropping it flushes pending lines.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("invalid log filter {directive:?} ({err}), using {DEFAULT_LOG_FILTER}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

pub fn init_tracing(settings: &LogSettings) -> Option<FileLogGuard> {
    let stdout_layer = fmt::layer().with_target(true);
    let registry = tracing_subscriber::registry()
        .with(build_filter(&settings.filter))
        .with(stdout_layer);

    let Some(dir) = &settings.file_dir else {
        registry.init();
        return None;
    };

    if let Err(err) = std::fs::create_dir_all(dir) {
        registry.init();
        tracing::warn!(error = %err, dir = %dir.display(), "file logging disabled");
        return None;
    }

    let (file_writer, guard) =
        tracing_appender::non_blocking(RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX));
    registry
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Some(FileLogGuard { _guard: guard })
}
