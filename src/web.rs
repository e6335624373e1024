//! Browser bridge
//!
//! Thin wasm-bindgen surface for the page: the page renders snapshots and
//! forwards clicks, uploads and a once-per-frame `poll`. Errors come back as
//! strings for display.

use wasm_bindgen::prelude::*;

use crate::authoring::GameBuilder;
use crate::definition::Difficulty;
use crate::highscores::HighScores;
use crate::session::{Feedback, GameMode, Session, Submission, SystemClock};
use crate::settings::Settings;
use crate::store::{self, LocalStorageStore};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Libras Play starting...");
}

/// Store uploaded game files, keyed by file name
#[wasm_bindgen]
pub fn import_game(file_name: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let mut store = LocalStorageStore::open().map_err(js_err)?;
    let report = store::import_files(&mut store, [(file_name, bytes)]);
    match report.failed.into_iter().next() {
        Some((_, e)) => Err(js_err(e)),
        None => Ok(()),
    }
}

/// JSON array of stored game names
#[wasm_bindgen]
pub fn list_games() -> Result<String, JsValue> {
    let store = LocalStorageStore::open().map_err(js_err)?;
    let names = store::catalog(&store).map_err(js_err)?;
    serde_json::to_string(&names).map_err(js_err)
}

/// Authoring form bridge
#[wasm_bindgen]
#[derive(Default)]
pub struct WebGameBuilder {
    inner: GameBuilder,
}

#[wasm_bindgen]
impl WebGameBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: &str) {
        self.inner.name = name.to_string();
    }

    /// One of "easy", "medium" or "hard"
    pub fn set_difficulty(&mut self, difficulty: &str) -> Result<(), JsValue> {
        self.inner.difficulty = Difficulty::from_str(difficulty)
            .ok_or_else(|| JsValue::from_str(&format!("unknown difficulty: {}", difficulty)))?;
        Ok(())
    }

    pub fn set_limits(&mut self, time_limit_seconds: u32, max_attempts: u32, points: i32, bonus: i32) {
        self.inner.time_limit_seconds = time_limit_seconds;
        self.inner.max_attempts = max_attempts;
        self.inner.points = points;
        self.inner.bonus = bonus;
    }

    pub fn add_signal(
        &mut self,
        signal_image: &str,
        representation_image: &str,
        text: &str,
    ) -> Result<(), JsValue> {
        self.inner
            .add_signal(signal_image, representation_image, text)
            .map_err(js_err)
    }

    /// Build the game and return the JSON file contents to download as `<name>.json`
    pub fn export(&mut self) -> Result<String, JsValue> {
        let definition = self.inner.build().map_err(js_err)?;
        definition.to_json_pretty().map_err(js_err)
    }
}

/// One play-through, driven by the page
#[wasm_bindgen]
pub struct WebSession {
    session: Session<SystemClock>,
    settings: Settings,
    recorded: bool,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        log::info!("Session initialized with seed: {}", seed);
        Self {
            session: Session::with_system_clock(settings.session_config(seed)),
            settings,
            recorded: false,
        }
    }

    /// Mode label pre-selected in the mode dialog
    pub fn default_mode(&self) -> String {
        self.settings.last_mode.as_str().to_string()
    }

    pub fn default_infinite(&self) -> bool {
        self.settings.infinite_mode
    }

    pub fn select_mode(&mut self, mode: &str, infinite_mode: bool) -> Result<(), JsValue> {
        let mode = GameMode::from_str(mode)
            .ok_or_else(|| JsValue::from_str(&format!("unknown game mode: {}", mode)))?;
        self.session.select_mode(mode, infinite_mode).map_err(js_err)?;
        self.settings.remember_mode(mode, infinite_mode);
        self.settings.save();
        Ok(())
    }

    pub fn load(&mut self, name: &str) -> Result<(), JsValue> {
        let store = LocalStorageStore::open().map_err(js_err)?;
        self.session.load_from_store(&store, name).map_err(js_err)
    }

    /// Returns "correct", "incorrect" or "ignored"
    pub fn submit_answer(&mut self, value: &str) -> String {
        let outcome = self.session.submit_answer(value);
        self.record_if_ended();
        match outcome {
            Submission::Ignored => "ignored".to_string(),
            Submission::Accepted(Feedback::Correct) => "correct".to_string(),
            Submission::Accepted(Feedback::Incorrect) => "incorrect".to_string(),
        }
    }

    /// Advance timers; returns the JSON array of events since the last call
    pub fn poll(&mut self) -> Result<String, JsValue> {
        self.session.poll();
        self.record_if_ended();
        serde_json::to_string(&self.session.drain_events()).map_err(js_err)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(js_err)
    }
}

impl WebSession {
    fn record_if_ended(&mut self) {
        if self.recorded || !self.session.phase().is_terminal() {
            return;
        }
        self.recorded = true;
        let mut scores = HighScores::load();
        if let Some(rank) = scores.record_session(&self.session.snapshot(), js_sys::Date::now()) {
            log::info!("New high score, rank {}", rank);
            scores.save();
        }
    }
}
