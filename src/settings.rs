//! Player preferences
//!
//! Persisted separately from game files in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::FEEDBACK_PAUSE_MS;
use crate::session::{GameMode, SessionConfig};

/// Preferences remembered between sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode pre-selected in the mode dialog
    pub last_mode: GameMode,
    /// Infinite-mode checkbox state
    pub infinite_mode: bool,
    /// Pause after each answer before the next round (ms)
    pub feedback_pause_ms: u64,
    /// Round length forced for every game, instead of each game's own limit
    pub round_seconds_override: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_mode: GameMode::SignToText,
            infinite_mode: false,
            feedback_pause_ms: FEEDBACK_PAUSE_MS,
            round_seconds_override: None,
        }
    }
}

impl Settings {
    /// Remember the choice made in the mode dialog
    pub fn remember_mode(&mut self, mode: GameMode, infinite_mode: bool) {
        self.last_mode = mode;
        self.infinite_mode = infinite_mode;
    }

    /// Session configuration for a new session
    pub fn session_config(&self, seed: u64) -> SessionConfig {
        SessionConfig {
            seed,
            round_seconds: self.round_seconds_override.filter(|s| *s > 0),
            feedback_pause_ms: self.feedback_pause_ms,
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "libras_play_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save settings");
                } else {
                    log::info!("Settings saved");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
