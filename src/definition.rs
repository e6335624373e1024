//! Game definition data model
//!
//! Mirrors the JSON file produced by the authoring tool:
//! `name`, `type`, `difficulty`, `description`, `timeLimit`, `maxAttempts`,
//! `rewards {points, bonus}`, `penalties {wrongAnswer}` and
//! `signals [{signalImage, representationImage, text}]`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::DefinitionError;

/// Difficulty label chosen at authoring time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn from_str(s: &str) -> Option<Self> {
        Difficulty::ALL.into_iter().find(|d| d.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Points awarded per correct answer and on completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Rewards {
    #[serde(rename = "points", default)]
    pub points_per_correct: i32,
    #[serde(rename = "bonus", default)]
    pub completion_bonus: i32,
}

/// Score change per wrong answer (usually negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Penalties {
    #[serde(rename = "wrongAnswer", default)]
    pub wrong_answer: i32,
}

/// One sign: its image, a secondary representation image and its meaning.
///
/// Images are data-URI strings and are compared as opaque references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalItem {
    #[serde(rename = "signalImage")]
    pub primary_image: String,
    #[serde(rename = "representationImage", default)]
    pub representation_image: String,
    pub text: String,
}

fn default_game_type() -> String {
    GAME_TYPE_SIGNALS.to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// A complete game as authored and exported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDefinition {
    pub name: String,
    #[serde(rename = "type", default = "default_game_type")]
    pub game_type: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
    /// Round countdown in seconds (0 = engine default)
    #[serde(rename = "timeLimit", default)]
    pub time_limit_seconds: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default)]
    pub rewards: Rewards,
    #[serde(default)]
    pub penalties: Penalties,
    #[serde(rename = "signals")]
    pub items: Vec<SignalItem>,
}

/// A definition serialized for download as `<name>.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedGame {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl GameDefinition {
    /// Parse and validate a raw uploaded game file
    pub fn from_bytes(payload: &[u8]) -> Result<Self, DefinitionError> {
        let mut definition: GameDefinition = serde_json::from_slice(payload)?;
        definition.validate()?;
        definition.max_attempts = definition.attempts();
        Ok(definition)
    }

    /// Check the invariants every playable definition must hold
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.name.trim().is_empty() {
            return Err(DefinitionError::MissingName);
        }
        if self.items.is_empty() {
            return Err(DefinitionError::NoSignals);
        }
        Ok(())
    }

    /// Err when a round cannot offer a full set of distinct alternatives
    pub fn ensure_full_rounds(&self) -> Result<(), DefinitionError> {
        if self.items.len() < ALTERNATIVE_COUNT {
            return Err(DefinitionError::InsufficientItems {
                available: self.items.len(),
                needed: ALTERNATIVE_COUNT,
            });
        }
        Ok(())
    }

    /// Attempts per session (0 = engine default)
    pub fn attempts(&self) -> u32 {
        if self.max_attempts == 0 {
            DEFAULT_MAX_ATTEMPTS
        } else {
            self.max_attempts
        }
    }

    /// Countdown start for each round
    pub fn round_seconds(&self) -> u32 {
        if self.time_limit_seconds == 0 {
            DEFAULT_ROUND_SECONDS
        } else {
            self.time_limit_seconds
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, DefinitionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize for download
    pub fn export(&self) -> Result<ExportedGame, DefinitionError> {
        self.validate()?;
        Ok(ExportedGame {
            file_name: format!("{}.json", self.name),
            bytes: self.to_json_pretty()?.into_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANIMAIS: &str = r#"{
        "name": "Animais",
        "type": "signals",
        "difficulty": "medium",
        "description": "Animais em Libras",
        "timeLimit": 45,
        "maxAttempts": 2,
        "rewards": { "points": 10, "bonus": 50 },
        "penalties": { "wrongAnswer": -5 },
        "signals": [
            { "signalImage": "data:image/png;base64,AA==", "representationImage": "data:image/png;base64,AQ==", "text": "gato" },
            { "signalImage": "data:image/png;base64,Ag==", "representationImage": "data:image/png;base64,Aw==", "text": "cachorro" }
        ]
    }"#;

    #[test]
    fn test_parse_full_definition() {
        let def = GameDefinition::from_bytes(ANIMAIS.as_bytes()).unwrap();
        assert_eq!(def.name, "Animais");
        assert_eq!(def.difficulty, Difficulty::Medium);
        assert_eq!(def.time_limit_seconds, 45);
        assert_eq!(def.max_attempts, 2);
        assert_eq!(def.rewards.points_per_correct, 10);
        assert_eq!(def.rewards.completion_bonus, 50);
        assert_eq!(def.penalties.wrong_answer, -5);
        assert_eq!(def.items.len(), 2);
        assert_eq!(def.items[1].text, "cachorro");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"name":"Cores","signals":[{"signalImage":"a","text":"azul"}]}"#;
        let def = GameDefinition::from_bytes(json.as_bytes()).unwrap();
        assert_eq!(def.game_type, "signals");
        assert_eq!(def.difficulty, Difficulty::Easy);
        assert_eq!(def.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(def.round_seconds(), DEFAULT_ROUND_SECONDS);
        assert_eq!(def.rewards, Rewards::default());
    }

    #[test]
    fn test_zero_max_attempts_uses_default() {
        let json = r#"{"name":"Cores","maxAttempts":0,"signals":[{"signalImage":"a","text":"azul"}]}"#;
        let def = GameDefinition::from_bytes(json.as_bytes()).unwrap();
        assert_eq!(def.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_difficulty_labels() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("Medium"), None);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = GameDefinition::from_bytes(b"not json").unwrap_err();
        assert!(matches!(err, DefinitionError::Malformed(_)));

        // signals missing entirely
        let err = GameDefinition::from_bytes(br#"{"name":"x"}"#).unwrap_err();
        assert!(matches!(err, DefinitionError::Malformed(_)));
    }

    #[test]
    fn test_blank_name_and_empty_signals_rejected() {
        let err = GameDefinition::from_bytes(br#"{"name":"  ","signals":[]}"#).unwrap_err();
        assert!(matches!(err, DefinitionError::MissingName));
        let err = GameDefinition::from_bytes(br#"{"name":"x","signals":[]}"#).unwrap_err();
        assert!(matches!(err, DefinitionError::NoSignals));
    }

    #[test]
    fn test_insufficient_items() {
        let def = GameDefinition::from_bytes(ANIMAIS.as_bytes()).unwrap();
        match def.ensure_full_rounds() {
            Err(DefinitionError::InsufficientItems { available, needed }) => {
                assert_eq!(available, 2);
                assert_eq!(needed, ALTERNATIVE_COUNT);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_export_uses_file_format_field_names() {
        let def = GameDefinition::from_bytes(ANIMAIS.as_bytes()).unwrap();
        let exported = def.export().unwrap();
        assert_eq!(exported.file_name, "Animais.json");

        let value: serde_json::Value = serde_json::from_slice(&exported.bytes).unwrap();
        assert_eq!(value["timeLimit"], 45);
        assert_eq!(value["maxAttempts"], 2);
        assert_eq!(value["rewards"]["points"], 10);
        assert_eq!(value["penalties"]["wrongAnswer"], -5);
        assert_eq!(value["signals"][0]["signalImage"], "data:image/png;base64,AA==");

        assert_eq!(GameDefinition::from_bytes(&exported.bytes).unwrap(), def);
    }
}
