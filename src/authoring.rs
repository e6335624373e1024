//! Game authoring
//!
//! Collects signals one at a time and builds an exportable `GameDefinition`
//! with the authoring defaults (60 s rounds, 3 attempts, 10 points, 50 bonus,
//! fixed -5 penalty).

use crate::consts::*;
use crate::definition::{Difficulty, GameDefinition, Penalties, Rewards, SignalItem};
use crate::error::DefinitionError;
use crate::media::DataUri;

/// Builder behind the "create game" form
#[derive(Debug, Clone)]
pub struct GameBuilder {
    pub name: String,
    pub difficulty: Difficulty,
    pub time_limit_seconds: u32,
    pub max_attempts: u32,
    pub points: i32,
    pub bonus: i32,
    signals: Vec<SignalItem>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            name: String::new(),
            difficulty: Difficulty::Easy,
            time_limit_seconds: AUTHORING_TIME_LIMIT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            points: AUTHORING_POINTS,
            bonus: AUTHORING_BONUS,
            signals: Vec::new(),
        }
    }
}

fn check_image(field: &'static str, value: &str) -> Result<(), DefinitionError> {
    if value.is_empty() {
        return Err(DefinitionError::EmptyField(field));
    }
    let uri = DataUri::parse(value)
        .map_err(|reason| DefinitionError::InvalidImage { field, reason })?;
    if !uri.is_image() {
        return Err(DefinitionError::InvalidImage {
            field,
            reason: format!("mime type {} is not an image", uri.mime),
        });
    }
    Ok(())
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals added so far, in order
    pub fn signals(&self) -> &[SignalItem] {
        &self.signals
    }

    /// Add a signal; all three fields are required
    pub fn add_signal(
        &mut self,
        signal_image: &str,
        representation_image: &str,
        text: &str,
    ) -> Result<(), DefinitionError> {
        check_image("signalImage", signal_image)?;
        check_image("representationImage", representation_image)?;
        if text.trim().is_empty() {
            return Err(DefinitionError::EmptyField("text"));
        }

        self.signals.push(SignalItem {
            primary_image: signal_image.to_string(),
            representation_image: representation_image.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    /// Build the definition and reset the name and signal list for the next game
    pub fn build(&mut self) -> Result<GameDefinition, DefinitionError> {
        if self.name.trim().is_empty() {
            return Err(DefinitionError::MissingName);
        }
        if self.signals.is_empty() {
            return Err(DefinitionError::NoSignals);
        }
        if self.time_limit_seconds == 0 {
            return Err(DefinitionError::NotPositive("timeLimit"));
        }
        if self.max_attempts == 0 {
            return Err(DefinitionError::NotPositive("maxAttempts"));
        }

        let definition = GameDefinition {
            name: std::mem::take(&mut self.name),
            game_type: GAME_TYPE_SIGNALS.to_string(),
            difficulty: self.difficulty,
            description: AUTHORING_DESCRIPTION.to_string(),
            time_limit_seconds: self.time_limit_seconds,
            max_attempts: self.max_attempts,
            rewards: Rewards {
                points_per_correct: self.points,
                completion_bonus: self.bonus,
            },
            penalties: Penalties {
                wrong_answer: AUTHORING_WRONG_ANSWER,
            },
            items: std::mem::take(&mut self.signals),
        };
        log::info!(
            "Built game '{}' with {} signals",
            definition.name,
            definition.items.len()
        );
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMG: &str = "data:image/png;base64,AA==";

    #[test]
    fn test_add_signal_requires_all_fields() {
        let mut builder = GameBuilder::new();
        assert!(matches!(
            builder.add_signal("", IMG, "gato"),
            Err(DefinitionError::EmptyField("signalImage"))
        ));
        assert!(matches!(
            builder.add_signal(IMG, "", "gato"),
            Err(DefinitionError::EmptyField("representationImage"))
        ));
        assert!(matches!(
            builder.add_signal(IMG, IMG, "   "),
            Err(DefinitionError::EmptyField("text"))
        ));
        assert!(matches!(
            builder.add_signal("gato.png", IMG, "gato"),
            Err(DefinitionError::InvalidImage { .. })
        ));
        assert!(builder.signals().is_empty());
    }

    #[test]
    fn test_build_requires_name_and_signals() {
        let mut builder = GameBuilder::new();
        assert!(matches!(builder.build(), Err(DefinitionError::MissingName)));

        builder.name = "Animais".into();
        assert!(matches!(builder.build(), Err(DefinitionError::NoSignals)));
    }

    #[test]
    fn test_build_rejects_zero_limits() {
        let mut builder = GameBuilder::new();
        builder.name = "Animais".into();
        builder.add_signal(IMG, IMG, "gato").unwrap();

        builder.time_limit_seconds = 0;
        assert!(matches!(
            builder.build(),
            Err(DefinitionError::NotPositive("timeLimit"))
        ));

        builder.time_limit_seconds = 45;
        builder.max_attempts = 0;
        assert!(matches!(
            builder.build(),
            Err(DefinitionError::NotPositive("maxAttempts"))
        ));

        // Rejected builds keep the form contents
        builder.max_attempts = 2;
        let def = builder.build().unwrap();
        assert_eq!(def.name, "Animais");
        assert_eq!(def.time_limit_seconds, 45);
        assert_eq!(def.max_attempts, 2);
    }

    #[test]
    fn test_build_applies_authoring_defaults_and_resets() {
        let mut builder = GameBuilder::new();
        builder.name = "Animais".into();
        builder.difficulty = Difficulty::Hard;
        builder.add_signal(IMG, IMG, "gato").unwrap();

        let def = builder.build().unwrap();
        assert_eq!(def.name, "Animais");
        assert_eq!(def.game_type, "signals");
        assert_eq!(def.difficulty, Difficulty::Hard);
        assert_eq!(def.time_limit_seconds, 60);
        assert_eq!(def.max_attempts, 3);
        assert_eq!(def.rewards.points_per_correct, 10);
        assert_eq!(def.rewards.completion_bonus, 50);
        assert_eq!(def.penalties.wrong_answer, -5);
        assert_eq!(def.items.len(), 1);

        // Form resets name and signals, keeps the rest
        assert!(builder.name.is_empty());
        assert!(builder.signals().is_empty());
        assert_eq!(builder.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_built_game_exports_and_reimports() {
        let mut builder = GameBuilder::new();
        builder.name = "Frutas".into();
        builder.add_signal(IMG, IMG, "maçã").unwrap();
        let def = builder.build().unwrap();

        let exported = def.export().unwrap();
        assert_eq!(exported.file_name, "Frutas.json");
        assert_eq!(GameDefinition::from_bytes(&exported.bytes).unwrap(), def);
    }
}
