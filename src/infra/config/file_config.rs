use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, AuthConfig, ChatConfig, ExportConfig, LogConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub chat: Option<FileChatConfig>,
    pub auth: Option<FileAuthConfig>,
    pub export: Option<FileExportConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(chat) = self.chat {
            chat.merge_into(&mut config.chat);
        }

        if let Some(auth) = self.auth {
            auth.merge_into(&mut config.auth);
        }

        if let Some(export) = self.export {
            export.merge_into(&mut config.export);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub reply_delay_min_ms: Option<u64>,
    pub reply_delay_max_ms: Option<u64>,
}

impl FileChatConfig {
    fn merge_into(self, config: &mut ChatConfig) {
        if let Some(min_ms) = self.reply_delay_min_ms {
            config.reply_delay_min_ms = min_ms;
        }

        if let Some(max_ms) = self.reply_delay_max_ms {
            config.reply_delay_max_ms = max_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileAuthConfig {
    pub request_delay_ms: Option<u64>,
}

impl FileAuthConfig {
    fn merge_into(self, config: &mut AuthConfig) {
        if let Some(delay_ms) = self.request_delay_ms {
            config.request_delay_ms = delay_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileExportConfig {
    pub directory: Option<PathBuf>,
}

impl FileExportConfig {
    fn merge_into(self, config: &mut ExportConfig) {
        if let Some(directory) = self.directory {
            config.directory = Some(directory);
        }
    }
}
