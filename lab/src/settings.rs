// settings.rs - User preferences persisted between runs

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::LabError;

const APP_DIR: &str = "portfolio-lab";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Fr => Language::En,
            Language::En => Language::Fr,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "FR",
            Language::En => "EN",
        }
    }

    /// Chooses between a French and an English string.
    pub fn pick<'a>(self, fr: &'a str, en: &'a str) -> &'a str {
        match self {
            Language::Fr => fr,
            Language::En => en,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: Language,
}

/// Location of the settings file. Without a path, settings live in memory only.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    pub fn in_config_dir() -> Self {
        let path = dirs::config_dir().map(|base| base.join(APP_DIR).join(SETTINGS_FILE));
        if path.is_none() {
            warn!("no config directory on this platform; settings will not persist");
        }
        Self { path }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads settings, falling back to defaults when the file is missing or broken.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => {
                info!(language = ?settings.language, "settings loaded");
                settings
            }
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!(%err, "ignoring unreadable settings");
                Settings::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<Settings>, LabError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), LabError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_json::to_string_pretty(settings)?)?;
        Ok(())
    }
}
