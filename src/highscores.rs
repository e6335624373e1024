//! Per-game high score boards
//!
//! Persisted to LocalStorage, tracks the top 10 scores of each game.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::session::{GameMode, Snapshot};

/// Maximum number of high scores kept per game
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub mode: GameMode,
    pub infinite_mode: bool,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score boards keyed by game name
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub games: BTreeMap<String, Vec<HighScoreEntry>>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "libras_play_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Board for one game, best first
    pub fn entries(&self, game: &str) -> &[HighScoreEntry] {
        self.games.get(game).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a score qualifies for a game's board
    pub fn qualifies(&self, game: &str, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        let entries = self.entries(game);
        if entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, game: &str, score: u32) -> Option<usize> {
        if !self.qualifies(game, score) {
            return None;
        }
        let entries = self.entries(game);
        let rank = entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(entries.len()) + 1)
    }

    /// Add a score to a game's board (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if didn't qualify.
    pub fn add_score(&mut self, game: &str, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(game, entry.score) {
            return None;
        }

        let entries = self.games.entry(game.to_string()).or_default();
        let pos = entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                entries.insert(i, entry);
                i + 1
            }
            None => {
                entries.push(entry);
                entries.len()
            }
        };
        entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Record the result of a finished session
    pub fn record_session(&mut self, snapshot: &Snapshot, timestamp: f64) -> Option<usize> {
        if !snapshot.phase.is_terminal() {
            return None;
        }
        let (Some(game), Some(mode)) = (snapshot.game_name.as_deref(), snapshot.mode) else {
            return None;
        };
        self.add_score(
            game,
            HighScoreEntry {
                score: snapshot.score,
                mode,
                infinite_mode: snapshot.infinite_mode,
                timestamp,
            },
        )
    }

    pub fn is_empty(&self) -> bool {
        self.games.values().all(Vec::is_empty)
    }

    /// Best score for a game (if any)
    pub fn top_score(&self, game: &str) -> Option<u32> {
        self.entries(game).first().map(|e| e.score)
    }

    /// Parse stored boards, warning on unreadable JSON
    #[allow(dead_code)]
    fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(scores) => Some(scores),
            Err(e) => {
                log::warn!("Ignoring unreadable high scores: {}", e);
                None
            }
        }
    }

    /// Load high scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(scores) = Self::from_json(&json) {
                    log::info!("Loaded high scores for {} games", scores.games.len());
                    return scores;
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save high scores");
                } else {
                    log::info!("High scores saved ({} games)", self.games.len());
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
