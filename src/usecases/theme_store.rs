use crate::{domain::theme::Theme, infra::kv_store::KeyValueStore};

pub const THEME_KEY: &str = "theme_dark";

/// Light/dark preference persisted as a JSON boolean.
pub struct ThemeStore<S: KeyValueStore> {
    storage: S,
    theme: Theme,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            theme: Theme::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Missing or unreadable values fall back to light.
    pub fn restore(&mut self) -> Theme {
        let stored = match self.storage.get(THEME_KEY) {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(error = %error, "failed to read theme preference");
                None
            }
        };

        self.theme = stored
            .and_then(|raw| match serde_json::from_str::<bool>(&raw) {
                Ok(is_dark) => Some(Theme::from_dark_flag(is_dark)),
                Err(error) => {
                    tracing::warn!(error = %error, "theme preference is corrupt, using default");
                    None
                }
            })
            .unwrap_or_default();

        self.theme
    }

    /// Flips the theme. A failed write keeps the new theme for this run.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();

        let value = if self.theme.is_dark() { "true" } else { "false" };
        if let Err(error) = self.storage.set(THEME_KEY, value) {
            tracing::warn!(error = %error, "failed to persist theme preference");
        }

        tracing::debug!(theme = self.theme.as_label(), "theme toggled");
        self.theme
    }
}
