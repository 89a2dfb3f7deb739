pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod painting_table;
pub mod query;
pub mod settings;
pub mod view;

pub use crate::catalog::CatalogSession;
pub use crate::config::{CatalogConfig, DEFAULT_PAGE_SIZE};
pub use crate::errors::{AppError, AppResult};
pub use crate::painting_table::{AddOutcome, PaintingTable, PAINTING_TABLE_CAPACITY};

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Installs the JSON file logger under `data_dir/logs`. `RUST_LOG` overrides
/// the default `info` filter.
pub fn init_tracing(data_dir: &Path) -> Result<(), String> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "catalog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}
