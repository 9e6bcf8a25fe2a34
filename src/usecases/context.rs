use std::path::PathBuf;

use crate::infra::{config::AppConfig, storage_layout::StorageLayout};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub layout: StorageLayout,
}

impl AppContext {
    pub fn new(config: AppConfig, layout: StorageLayout) -> Self {
        Self { config, layout }
    }

    /// Configured export directory, or `<config dir>/exports`.
    pub fn export_dir(&self) -> PathBuf {
        self.config
            .export
            .directory
            .clone()
            .unwrap_or_else(|| self.layout.export_dir.clone())
    }
}
