// SPDX-License-Identifier: GPL-3.0

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::warn;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::navigator::ListWindow;
use crate::store::DeckSeed;

pub const APP_ID: &str = "dev.wordshorts.WordShorts";
pub const DEFAULT_API_BASE: &str = "https://word-shorts-api.kirklayer6590.workers.dev";

/// Configuration data that persists between application runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordShortsConfig {
    /// Base url of the vocab api
    pub api_base: String,
    /// Overrides the database location inside the data directory
    pub database_path: Option<PathBuf>,
    /// Deck created on first run
    pub default_deck: DeckSeed,
    /// Row metrics of the word list
    pub list: ListWindow,
}

impl Default for WordShortsConfig {
    fn default() -> Self {
        Self {
            api_base: String::from(DEFAULT_API_BASE),
            database_path: None,
            default_deck: DeckSeed::default(),
            list: ListWindow::default(),
        }
    }
}

impl WordShortsConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_ID).join("config.ron"))
    }

    /// Loads the user config, falling back to defaults if it can't be read
    pub fn config() -> WordShortsConfig {
        match Self::config_path() {
            Some(path) => Self::load(&path).unwrap_or_else(|error| {
                warn!("Error whilst loading config: {error:#?}");
                WordShortsConfig::default()
            }),
            None => WordShortsConfig::default(),
        }
    }

    /// Reads the config at `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, anywho::Error> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(ron::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), anywho::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = ron::ser::to_string_pretty(self, PrettyConfig::default())?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn database_path(&self) -> Result<PathBuf, anywho::Error> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        Ok(dirs::data_dir()
            .ok_or_else(|| anywho::anywho!("Failed to get data directory"))?
            .join(APP_ID)
            .join("database")
            .join("word_shorts.db"))
    }
}
