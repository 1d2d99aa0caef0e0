//! Settings record repository.

use super::collection::RepoResult;
use crate::config::SETTINGS_KEY;
use crate::model::settings::{Settings, Theme};
use crate::store::{JsonStore, KeyValueStore};

pub struct SettingsRepository<S> {
    store: JsonStore<S>,
    settings: Settings,
}

impl<S: KeyValueStore> SettingsRepository<S> {
    pub fn load(store: S) -> RepoResult<Self> {
        let store = JsonStore::new(store);
        let settings = store.get(SETTINGS_KEY, Settings::default())?;
        Ok(Self { store, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    /// Switches dark/light and persists the record.
    pub fn toggle_theme(&mut self) -> RepoResult<Theme> {
        self.settings.theme = self.settings.theme.toggled();
        self.store.set(SETTINGS_KEY, &self.settings)?;
        Ok(self.settings.theme)
    }
}
