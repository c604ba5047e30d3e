use crate::constants::{SETTINGS_DIR_NAME, SETTINGS_FILE_NAME};
use crate::error::SettingsError;
use crate::theme::ThemeName;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user settings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemeName,
}

/// Reads settings once at startup and writes them back on every change
pub struct SettingsStore {
    settings: Settings,
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Open the store rooted at `dir`, loading any saved settings
    ///
    /// A missing or unreadable file yields defaults; it is rewritten on the
    /// next change.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(SETTINGS_FILE_NAME);
        let settings = match Self::read(&path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable settings");
                Settings::default()
            }
        };
        tracing::debug!(theme = ?settings.theme, "Settings loaded");

        SettingsStore {
            settings,
            path: Some(path),
        }
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        SettingsStore {
            settings: Settings::default(),
            path: None,
        }
    }

    /// Default settings directory (`~/.accounts-tui`)
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_DIR_NAME)
    }

    pub fn theme(&self) -> ThemeName {
        self.settings.theme
    }

    /// Change the theme and persist it
    ///
    /// The in-memory value changes even when the write fails.
    pub fn set_theme(&mut self, theme: ThemeName) -> Result<(), SettingsError> {
        self.settings.theme = theme;
        self.save()
    }

    fn read(path: &Path) -> Result<Option<Settings>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let settings = serde_yaml::from_str(&content)?;
        Ok(Some(settings))
    }

    fn save(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_yaml::to_string(&self.settings)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_default_theme() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::open(dir.path());
        assert_eq!(store.theme(), ThemeName::Modern);
        assert!(!dir.path().join(SETTINGS_FILE_NAME).exists());
    }

    #[test]
    fn test_theme_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let mut store = SettingsStore::open(dir.path());
        store.set_theme(ThemeName::Space).unwrap();

        let reopened = SettingsStore::open(dir.path());
        assert_eq!(reopened.theme(), ThemeName::Space);
    }

    #[test]
    fn test_creates_missing_directory_on_write() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("settings");
        let mut store = SettingsStore::open(&nested);
        store.set_theme(ThemeName::Comic).unwrap();
        assert!(nested.join(SETTINGS_FILE_NAME).exists());
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE_NAME), "theme: neon\n").unwrap();
        let store = SettingsStore::open(dir.path());
        assert_eq!(store.theme(), ThemeName::Modern);
    }

    #[test]
    fn test_in_memory_store_never_writes() {
        let mut store = SettingsStore::in_memory();
        store.set_theme(ThemeName::Sap).unwrap();
        assert_eq!(store.theme(), ThemeName::Sap);
    }
}
