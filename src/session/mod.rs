//! Game session module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time only from the injected `Clock`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod engine;
pub mod round;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::Session;
pub use round::{answer_for, build_alternatives, prompt_for};
pub use state::{
    Alternative, Attempts, Feedback, GameMode, MediaKind, Phase, Prompt, SessionConfig,
    SessionEvent, Snapshot, Submission, TerminalReason,
};
