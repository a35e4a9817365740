//! Calendar settings persisted as TOML in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::coordinates::DEFAULT_PIXELS_PER_HOUR;

/// User-tunable calendar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Vertical scale of the day strip.
    pub pixels_per_hour: f32,
    /// Whether completed quests stay visible on the strip.
    pub show_completed: bool,
    /// UI theme name.
    pub theme: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
            show_completed: true,
            theme: "dark".to_string(),
        }
    }
}

impl CalendarSettings {
    /// Default settings file under the platform config dir.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "quest-calendar")
            .ok_or_else(|| anyhow!("could not determine config directory"))?;
        Ok(dirs.config_dir().join("settings.toml"))
    }

    /// Load settings from `path`, falling back to defaults if the file
    /// does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings at {}", path.display()))?;
        Ok(settings)
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, raw)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        Ok(())
    }
}
