//! Libras Play - sign-language matching games for the browser
//!
//! Core modules:
//! - `definition`: Game definition data model and file format
//! - `authoring`: Build and export new game definitions
//! - `store`: Local key-value storage of uploaded game files
//! - `session`: Deterministic game session engine (rounds, scoring, timer)
//! - `platform`: Browser/native platform abstraction
//! - `web`: wasm-bindgen bridge for the browser page

pub mod authoring;
pub mod definition;
pub mod error;
pub mod highscores;
pub mod media;
pub mod platform;
pub mod session;
pub mod settings;
pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use definition::{Difficulty, GameDefinition, Penalties, Rewards, SignalItem};
pub use error::{DefinitionError, LoadError, SessionError, StoreError};
pub use highscores::HighScores;
pub use session::{GameMode, Phase, Session, SessionConfig, SessionEvent, Snapshot};
pub use settings::Settings;
pub use store::{GameStore, MemoryStore, StoredRecord};

/// Game configuration constants
pub mod consts {
    /// Number of alternatives presented per round (one correct)
    pub const ALTERNATIVE_COUNT: usize = 4;
    /// Attempts granted when a definition does not set `maxAttempts`
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    /// Round countdown start when a definition does not set `timeLimit`
    pub const DEFAULT_ROUND_SECONDS: u32 = 30;
    /// Pause after an answer before the next round is presented
    pub const FEEDBACK_PAUSE_MS: u64 = 1000;
    /// Countdown resolution
    pub const TICK_MS: u64 = 1000;

    /// Authoring form defaults
    pub const AUTHORING_TIME_LIMIT: u32 = 60;
    pub const AUTHORING_POINTS: i32 = 10;
    pub const AUTHORING_BONUS: i32 = 50;
    /// Fixed penalty applied to every authored game
    pub const AUTHORING_WRONG_ANSWER: i32 = -5;
    pub const GAME_TYPE_SIGNALS: &str = "signals";
    pub const AUTHORING_DESCRIPTION: &str =
        "Jogo de sinais criado para ensinar sinais específicos em Libras.";
}
