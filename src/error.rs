//! Error types shared by the store, definition parser and session engine

use thiserror::Error;

use crate::session::Phase;

/// Local store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be opened
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// No record is stored under the requested name
    #[error("game not found: {0}")]
    NotFound(String),
    #[error("failed to read {name}: {reason}")]
    Read { name: String, reason: String },
    #[error("failed to write {name}: {reason}")]
    Write { name: String, reason: String },
    /// A stored envelope exists but cannot be decoded
    #[error("stored record {name} is corrupt: {reason}")]
    Corrupt { name: String, reason: String },
}

/// Game definition parse and validation failures
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("malformed game definition: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("game definition has no name")]
    MissingName,
    #[error("game definition has no signals")]
    NoSignals,
    /// Fewer items than a full alternative set needs
    #[error("only {available} signals available, {needed} needed for a full round")]
    InsufficientItems { available: usize, needed: usize },
    #[error("`{0}` must be a positive integer")]
    NotPositive(&'static str),
    #[error("signal field `{0}` is empty")]
    EmptyField(&'static str),
    #[error("signal field `{field}` is not a data URI image: {reason}")]
    InvalidImage { field: &'static str, reason: String },
}

/// Fetch or parse failure before a session becomes playable
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Session engine misuse or load failure
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("operation requires phase {expected:?}, session is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("failed to load game: {0}")]
    Load(#[from] LoadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_wraps_store_error() {
        let err: LoadError = StoreError::NotFound("Animais".into()).into();
        assert!(matches!(err, LoadError::Storage(StoreError::NotFound(_))));
        assert_eq!(err.to_string(), "game not found: Animais");
    }

    #[test]
    fn test_session_error_message() {
        let err = SessionError::WrongPhase {
            expected: Phase::ModeSelection,
            actual: Phase::Playing,
        };
        assert!(err.to_string().contains("ModeSelection"));
    }
}
