use crate::models::{default_playlist, Track};
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "simpleplayer.settings";
#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_VOLUME: f64 = 0.8;

/// Error type for settings storage
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[cfg(target_arch = "wasm32")]
    #[error("Local storage error: {0}")]
    Storage(#[from] StorageError),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("No configuration directory on this platform")]
    NoConfigDir,
}

/// What to do with playback after the user releases the seek knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResumePolicy {
    /// Always request playback, even if the track was paused before the seek.
    Always,
    /// Request playback only if the track was playing when the knob was released.
    #[default]
    OnlyIfWasPlaying,
}

/// Player settings stored between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default)]
    pub resume_on_seek_commit: ResumePolicy,
    #[serde(default)]
    pub autoplay_on_track_change: bool,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_playlist")]
    pub playlist: Vec<Track>,
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            resume_on_seek_commit: ResumePolicy::default(),
            autoplay_on_track_change: false,
            volume: DEFAULT_VOLUME,
            playlist: default_playlist(),
        }
    }
}

impl PlayerSettings {
    /// Repair values a hand-edited or older settings blob may carry.
    pub fn normalized(mut self) -> Self {
        self.volume = normalize_volume(self.volume);
        self.playlist.retain(|track| !track.source.trim().is_empty());
        if self.playlist.is_empty() {
            self.playlist = default_playlist();
        }
        self
    }

    /// Record a new volume. Returns whether it changed and the settings need saving.
    pub fn set_volume(&mut self, volume: f64) -> bool {
        let volume = normalize_volume(volume);
        if self.volume == volume {
            return false;
        }
        self.volume = volume;
        true
    }
}

/// Clamp a volume into `0.0..=1.0`, accepting legacy 0-100 percentages.
pub fn normalize_volume(mut value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_VOLUME;
    }
    let mut passes = 0;
    while value > 1.0 && passes < 4 {
        value /= 100.0;
        passes += 1;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(target_arch = "wasm32")]
pub fn load_settings() -> Result<PlayerSettings, SettingsError> {
    match LocalStorage::get::<PlayerSettings>(SETTINGS_KEY) {
        Ok(settings) => Ok(settings.normalized()),
        Err(StorageError::KeyNotFound(_)) => Ok(PlayerSettings::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_settings(settings: &PlayerSettings) -> Result<(), SettingsError> {
    LocalStorage::set(SETTINGS_KEY, settings)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings() -> Result<PlayerSettings, SettingsError> {
    load_settings_from(&settings_path()?)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_settings(settings: &PlayerSettings) -> Result<(), SettingsError> {
    save_settings_to(&settings_path()?, settings)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings_from(path: &Path) -> Result<PlayerSettings, SettingsError> {
    if !path.exists() {
        return Ok(PlayerSettings::default());
    }
    let raw = std::fs::read_to_string(path)?;
    let settings: PlayerSettings = serde_json::from_str(&raw)?;
    Ok(settings.normalized())
}

#[cfg(not(target_arch = "wasm32"))]
fn save_settings_to(path: &Path, settings: &PlayerSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn settings_path() -> Result<PathBuf, SettingsError> {
    let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
    Ok(base.join("simpleplayer").join(SETTINGS_FILE))
}

/// Load settings, falling back to defaults when storage is unreadable.
pub fn load_settings_or_default() -> PlayerSettings {
    match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("[Settings] Failed to load settings, using defaults: {}", err);
            PlayerSettings::default()
        }
    }
}
