mod adapter;
mod app_config;
mod file_config;
mod loader;

pub use adapter::FileConfigAdapter;
pub use app_config::{AppConfig, AuthConfig, ChatConfig, ExportConfig, LogConfig};
pub use loader::load;
