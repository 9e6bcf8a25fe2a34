use std::{env, fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "chatterm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let config_base = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "unable to resolve config base directory (XDG_CONFIG_HOME/HOME)".into(),
            })?;

        let config_dir = config_base.join(APP_DIR_NAME);
        let log_dir = config_dir.join("logs");
        let export_dir = config_dir.join("exports");

        Ok(Self {
            config_dir,
            log_dir,
            export_dir,
        })
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.config_dir, &self.log_dir] {
            fs::create_dir_all(dir).map_err(|source| AppError::StorageDirCreate {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// Key-value file holding the session token, identity record and theme.
    pub fn state_file(&self) -> PathBuf {
        self.config_dir.join("state.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env_lock, XdgOverride};

    #[test]
    fn logs_and_exports_are_under_config_dir() {
        let layout = StorageLayout::resolve().expect("layout should resolve");

        assert!(layout.log_dir.starts_with(&layout.config_dir));
        assert!(layout.export_dir.starts_with(&layout.config_dir));
        assert!(layout.state_file().starts_with(&layout.config_dir));
    }

    #[test]
    fn honors_xdg_config_home() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let _xdg = XdgOverride::set(dir.path());

        let layout = StorageLayout::resolve().expect("layout should resolve");
        layout.ensure_dirs().expect("dirs should be created");

        assert_eq!(layout.config_dir, dir.path().join(APP_DIR_NAME));
        assert!(layout.log_dir.is_dir());
    }
}
