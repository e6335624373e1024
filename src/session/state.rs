//! Session state types
//!
//! Everything the presentation shell reads back from a session lives here.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which side of a signal is shown and which side is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Show the sign image, answer with its text
    #[default]
    #[serde(rename = "signalToText")]
    SignToText,
    /// Show the sign image, answer with a sign image
    #[serde(rename = "objectToSignal")]
    ObjectToSign,
    /// Same rounds as `ObjectToSign`; kept as its own label
    #[serde(rename = "signalToObject")]
    SignToObject,
    /// Show the text, answer with a sign image
    #[serde(rename = "textToSignal")]
    TextToSign,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::SignToText,
        GameMode::ObjectToSign,
        GameMode::SignToObject,
        GameMode::TextToSign,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::SignToText => "signalToText",
            GameMode::ObjectToSign => "objectToSignal",
            GameMode::SignToObject => "signalToObject",
            GameMode::TextToSign => "textToSignal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        GameMode::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Kind of value shown as the round prompt
    pub fn prompt_kind(&self) -> MediaKind {
        match self {
            GameMode::TextToSign => MediaKind::Text,
            _ => MediaKind::Image,
        }
    }

    /// Kind of value the alternatives (and the answer) are
    pub fn answer_kind(&self) -> MediaKind {
        match self {
            GameMode::SignToText => MediaKind::Text,
            _ => MediaKind::Image,
        }
    }
}

/// Text label or image reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Text,
    Image,
}

/// What the player is asked about this round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub kind: MediaKind,
    pub value: String,
}

/// One answer candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub kind: MediaKind,
    pub value: String,
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to pick a mode
    ModeSelection,
    /// Definition being fetched and parsed
    Loading,
    /// A round is presented and accepts answers
    Playing,
    /// Showing the result of the last answer; answers are ignored
    AnswerFeedback,
    /// Sequential run finished
    Completed,
    /// Out of attempts, or missed in infinite mode
    Failed,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Completed | Phase::Failed)
    }
}

/// Result of the last answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Correct,
    Incorrect,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TerminalReason {
    Completed,
    AttemptsExhausted,
    InfiniteModeMiss,
}

/// Attempts left, or the single life of infinite mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attempts {
    Remaining(u32),
    SingleLife,
}

/// Outcome of `Session::submit_answer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Not accepting answers right now (feedback pause, not started, ended)
    Ignored,
    Accepted(Feedback),
}

/// Notifications for the presentation shell, drained after each call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    PhaseChanged { from: Phase, to: Phase },
    RoundStarted { index: usize },
    /// Countdown hit zero; an incorrect answer follows
    TimedOut { index: usize },
    Answered { feedback: Feedback, score: u32 },
    /// The definition has too few items for full alternative sets
    ReducedAlternatives { available: usize },
    Ended { reason: TerminalReason },
}

/// Per-session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seed for alternative selection, shuffling and infinite-mode picks
    pub seed: u64,
    /// Overrides the definition's `timeLimit`
    pub round_seconds: Option<u32>,
    pub feedback_pause_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            round_seconds: None,
            feedback_pause_ms: FEEDBACK_PAUSE_MS,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: Phase,
    pub game_name: Option<String>,
    pub mode: Option<GameMode>,
    pub infinite_mode: bool,
    pub current_index: usize,
    pub total_items: usize,
    pub prompt: Option<Prompt>,
    pub alternatives: Vec<Alternative>,
    pub score: u32,
    pub attempts: Attempts,
    /// Seconds left in the round; None in infinite mode or outside play
    pub time_remaining: Option<u32>,
    pub feedback: Option<Feedback>,
    pub terminal: Option<TerminalReason>,
}
