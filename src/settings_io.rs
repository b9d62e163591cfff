use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::settings::ClientSettings;

pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("rule_refiner");
    path.push("settings.json");
    path
}

/// Falls back to defaults when nothing usable is on disk.
pub fn load_settings() -> ClientSettings {
    let path = settings_path();
    if !path.exists() {
        return ClientSettings::default();
    }

    load_settings_from(&path).unwrap_or_else(|err| {
        warn!("Ignoring settings at {}: {err:#}", path.display());
        ClientSettings::default()
    })
}

pub fn load_settings_from(path: &Path) -> Result<ClientSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid settings in {}", path.display()))
}

pub fn save_settings(settings: &ClientSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
