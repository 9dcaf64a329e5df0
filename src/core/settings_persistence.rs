//! Settings persistence
//!
//! Saves and loads [`GameSettings`] to/from a JSON file so the menu choices
//! survive a restart.
//!
//! # File Location
//!
//! `settings.json` in the platform configuration directory, e.g.
//! `~/.config/omnichess/settings.json`. Falls back to the working directory
//! when no config directory can be resolved.
//!
//! # Error Handling
//!
//! - Load failures fall back to default settings
//! - Save failures are logged and returned, they never interrupt a game

use crate::core::{CoreResult, GameSettings};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the settings file path
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "omnichess", "OmniChess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings, using defaults when the file is missing or unreadable
pub fn load_settings(path: &Path) -> GameSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return GameSettings::default();
    }

    match read_settings(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings.sanitized()
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path, e
            );
            GameSettings::default()
        }
    }
}

fn read_settings(path: &Path) -> CoreResult<GameSettings> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write settings, creating the parent directory when needed
pub fn save_settings(path: &Path, settings: &GameSettings) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).inspect_err(|e| {
                error!("[SETTINGS] Failed to create settings directory at {:?}: {}", parent, e);
            })?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).inspect_err(|e| {
        error!("[SETTINGS] Failed to write settings file at {:?}: {}", path, e);
    })?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
