use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    infra::{
        self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError,
        storage_layout::StorageLayout,
    },
    usecases::context::AppContext,
};

/// Loads config, prepares the storage directories and starts file logging.
/// Keep the returned guard alive until exit so buffered log lines flush.
pub fn bootstrap(config_path: Option<&Path>) -> Result<(AppContext, WorkerGuard), AppError> {
    let context = build_context(config_path)?;
    context.layout.ensure_dirs()?;
    let guard = infra::logging::init(&context.config.logging, &context.layout.log_dir)?;

    tracing::info!(
        config_dir = %context.layout.config_dir.display(),
        "chatterm started"
    );
    Ok((context, guard))
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    let config = config_adapter.load().map_err(AppError::Other)?;
    let layout = StorageLayout::resolve()?;

    Ok(AppContext::new(config, layout))
}
