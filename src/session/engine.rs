//! Session engine
//!
//! Drives one play-through of a game definition:
//! ModeSelection -> Loading -> Playing <-> AnswerFeedback -> Completed | Failed.
//!
//! The engine never sleeps. `poll` reads the injected clock and catches up on
//! every countdown tick and feedback pause that elapsed since the last call.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::clock::{Clock, SystemClock};
use super::round::{answer_for, build_alternatives, prompt_for};
use super::state::*;
use crate::consts::*;
use crate::definition::GameDefinition;
use crate::error::{LoadError, SessionError};
use crate::store::GameStore;

/// A single game session
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    config: SessionConfig,
    clock: C,
    rng: Pcg32,
    phase: Phase,
    mode: Option<GameMode>,
    infinite_mode: bool,
    definition: Option<GameDefinition>,
    current_index: usize,
    alternatives: Vec<Alternative>,
    score: u32,
    remaining_attempts: u32,
    /// Countdown seconds left in the current round
    time_remaining: u32,
    /// Clock time the countdown last ticked (or the round started)
    last_tick_ms: u64,
    feedback: Option<Feedback>,
    /// Next round to present once the feedback pause ends
    pending_index: Option<usize>,
    feedback_until_ms: u64,
    terminal: Option<TerminalReason>,
    events: Vec<SessionEvent>,
}

impl Session<SystemClock> {
    /// Session on the platform wall clock
    pub fn with_system_clock(config: SessionConfig) -> Self {
        Self::new(config, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn new(config: SessionConfig, clock: C) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self {
            config,
            clock,
            rng,
            phase: Phase::ModeSelection,
            mode: None,
            infinite_mode: false,
            definition: None,
            current_index: 0,
            alternatives: Vec::new(),
            score: 0,
            remaining_attempts: 0,
            time_remaining: 0,
            last_tick_ms: 0,
            feedback: None,
            pending_index: None,
            feedback_until_ms: 0,
            terminal: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn infinite_mode(&self) -> bool {
        self.infinite_mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.remaining_attempts
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    pub fn terminal(&self) -> Option<TerminalReason> {
        self.terminal
    }

    pub fn definition(&self) -> Option<&GameDefinition> {
        self.definition.as_ref()
    }

    /// Seconds left in the round; None when no countdown runs
    pub fn time_remaining(&self) -> Option<u32> {
        match self.phase {
            Phase::Playing | Phase::AnswerFeedback if !self.infinite_mode => {
                Some(self.time_remaining)
            }
            _ => None,
        }
    }

    /// Correct answer value for the current round
    pub fn correct_answer(&self) -> Option<&str> {
        let mode = self.mode?;
        let item = self.definition.as_ref()?.items.get(self.current_index)?;
        Some(match mode.answer_kind() {
            MediaKind::Text => item.text.as_str(),
            MediaKind::Image => item.primary_image.as_str(),
        })
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn require(&self, expected: Phase) -> Result<(), SessionError> {
        if self.phase != expected {
            return Err(SessionError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn set_phase(&mut self, to: Phase) {
        if self.phase == to {
            return;
        }
        log::info!("Session phase {:?} -> {:?}", self.phase, to);
        self.events.push(SessionEvent::PhaseChanged {
            from: self.phase,
            to,
        });
        self.phase = to;
    }

    /// Choose the game mode; fixed for the rest of the session
    pub fn select_mode(&mut self, mode: GameMode, infinite_mode: bool) -> Result<(), SessionError> {
        self.require(Phase::ModeSelection)?;
        log::info!(
            "Selected mode {} (infinite: {})",
            mode.as_str(),
            infinite_mode
        );
        self.mode = Some(mode);
        self.infinite_mode = infinite_mode;
        self.set_phase(Phase::Loading);
        Ok(())
    }

    /// Fetch `name` from the store, parse it and start playing
    pub fn load_from_store<S: GameStore + ?Sized>(
        &mut self,
        store: &S,
        name: &str,
    ) -> Result<(), SessionError> {
        self.require(Phase::Loading)?;
        let record = store.get(name).map_err(|e| {
            log::error!("Failed to fetch game {}: {}", name, e);
            LoadError::from(e)
        })?;
        self.load_payload(&record.payload)
    }

    /// Parse a raw game file and start playing
    pub fn load_payload(&mut self, payload: &[u8]) -> Result<(), SessionError> {
        self.require(Phase::Loading)?;
        let definition = GameDefinition::from_bytes(payload).map_err(|e| {
            log::error!("Failed to parse game definition: {}", e);
            LoadError::from(e)
        })?;
        self.start(definition)
    }

    /// Start playing an already parsed definition
    pub fn start(&mut self, definition: GameDefinition) -> Result<(), SessionError> {
        self.require(Phase::Loading)?;
        definition.validate().map_err(LoadError::from)?;

        if let Err(e) = definition.ensure_full_rounds() {
            log::warn!("{}; rounds will offer fewer alternatives", e);
            self.events.push(SessionEvent::ReducedAlternatives {
                available: definition.items.len(),
            });
        }

        log::info!(
            "Starting game '{}' ({} signals)",
            definition.name,
            definition.items.len()
        );
        self.remaining_attempts = definition.attempts();
        self.score = 0;
        self.definition = Some(definition);

        let now = self.clock.now_ms();
        self.begin_round(0, now);
        self.set_phase(Phase::Playing);
        Ok(())
    }

    fn round_seconds(&self) -> u32 {
        match (self.config.round_seconds, &self.definition) {
            (Some(secs), _) if secs > 0 => secs,
            (_, Some(def)) => def.round_seconds(),
            _ => DEFAULT_ROUND_SECONDS,
        }
    }

    fn begin_round(&mut self, index: usize, at_ms: u64) {
        let (Some(def), Some(mode)) = (self.definition.as_ref(), self.mode) else {
            return;
        };
        self.alternatives = build_alternatives(&def.items, index, mode, &mut self.rng);
        self.current_index = index;
        self.time_remaining = self.round_seconds();
        self.last_tick_ms = at_ms;
        self.feedback = None;
        self.events.push(SessionEvent::RoundStarted { index });
        log::debug!("Round {} started", index);
    }

    fn apply_delta(&mut self, delta: i32) {
        self.score = self.score.saturating_add_signed(delta);
    }

    fn finish(&mut self, reason: TerminalReason) {
        log::info!("Session ended: {:?} (score {})", reason, self.score);
        self.terminal = Some(reason);
        self.pending_index = None;
        self.events.push(SessionEvent::Ended { reason });
        let phase = match reason {
            TerminalReason::Completed => Phase::Completed,
            TerminalReason::AttemptsExhausted | TerminalReason::InfiniteModeMiss => Phase::Failed,
        };
        self.set_phase(phase);
    }

    /// Answer the current round. Ignored unless a round is being played.
    pub fn submit_answer(&mut self, value: &str) -> Submission {
        if self.phase != Phase::Playing {
            log::debug!("Ignoring answer in phase {:?}", self.phase);
            return Submission::Ignored;
        }
        let now = self.clock.now_ms();
        let correct = self.correct_answer() == Some(value);
        Submission::Accepted(self.resolve(correct, now))
    }

    fn resolve(&mut self, correct: bool, at_ms: u64) -> Feedback {
        let Some(def) = self.definition.as_ref() else {
            return Feedback::Incorrect;
        };
        let total = def.items.len();
        let rewards = def.rewards;
        let penalty = def.penalties.wrong_answer;

        let feedback = if correct {
            self.apply_delta(rewards.points_per_correct);
            Feedback::Correct
        } else {
            self.apply_delta(penalty);
            Feedback::Incorrect
        };
        self.feedback = Some(feedback);
        self.events.push(SessionEvent::Answered {
            feedback,
            score: self.score,
        });

        if !correct {
            if self.infinite_mode {
                self.finish(TerminalReason::InfiniteModeMiss);
                return feedback;
            }
            self.remaining_attempts = self.remaining_attempts.saturating_sub(1);
            if self.remaining_attempts == 0 {
                self.finish(TerminalReason::AttemptsExhausted);
                return feedback;
            }
        }

        let next = if self.infinite_mode {
            self.rng.random_range(0..total)
        } else if self.current_index + 1 >= total {
            self.apply_delta(rewards.completion_bonus);
            self.finish(TerminalReason::Completed);
            return feedback;
        } else {
            self.current_index + 1
        };

        if self.config.feedback_pause_ms == 0 {
            self.begin_round(next, at_ms);
        } else {
            self.pending_index = Some(next);
            self.feedback_until_ms = at_ms + self.config.feedback_pause_ms;
            self.set_phase(Phase::AnswerFeedback);
        }
        feedback
    }

    /// Advance timers to the clock's current time
    pub fn poll(&mut self) {
        let now = self.clock.now_ms();
        loop {
            match self.phase {
                Phase::AnswerFeedback if now >= self.feedback_until_ms => {
                    let resume_at = self.feedback_until_ms;
                    if let Some(next) = self.pending_index.take() {
                        self.begin_round(next, resume_at);
                    }
                    self.set_phase(Phase::Playing);
                }
                Phase::Playing
                    if !self.infinite_mode && now.saturating_sub(self.last_tick_ms) >= TICK_MS =>
                {
                    self.last_tick_ms += TICK_MS;
                    self.time_remaining = self.time_remaining.saturating_sub(1);
                    if self.time_remaining == 0 {
                        log::info!("Round {} timed out", self.current_index);
                        self.events.push(SessionEvent::TimedOut {
                            index: self.current_index,
                        });
                        let at = self.last_tick_ms;
                        self.resolve(false, at);
                    }
                }
                _ => break,
            }
        }
    }

    /// Current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        let prompt = match (self.phase, self.mode, &self.definition) {
            (Phase::Playing | Phase::AnswerFeedback, Some(mode), Some(def)) => def
                .items
                .get(self.current_index)
                .map(|item| prompt_for(item, mode)),
            _ => None,
        };
        let alternatives = match self.phase {
            Phase::Playing | Phase::AnswerFeedback => self.alternatives.clone(),
            _ => Vec::new(),
        };
        let attempts = if self.infinite_mode {
            Attempts::SingleLife
        } else {
            Attempts::Remaining(self.remaining_attempts)
        };

        Snapshot {
            phase: self.phase,
            game_name: self.definition.as_ref().map(|d| d.name.clone()),
            mode: self.mode,
            infinite_mode: self.infinite_mode,
            current_index: self.current_index,
            total_items: self.definition.as_ref().map_or(0, |d| d.items.len()),
            prompt,
            alternatives,
            score: self.score,
            attempts,
            time_remaining: self.time_remaining(),
            feedback: self.feedback,
            terminal: self.terminal,
        }
    }

    /// Correct alternative for the current round, as presented
    pub fn correct_alternative(&self) -> Option<Alternative> {
        let mode = self.mode?;
        let item = self.definition.as_ref()?.items.get(self.current_index)?;
        Some(answer_for(item, mode))
    }
}
