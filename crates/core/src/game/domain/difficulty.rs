use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::game_error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                round_duration_secs: 20,
                match_threshold: 0.5,
            },
            Difficulty::Medium => DifficultyProfile {
                round_duration_secs: 10,
                match_threshold: 0.4,
            },
            Difficulty::Hard => DifficultyProfile {
                round_duration_secs: 5,
                match_threshold: 0.25,
            },
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Time limit and match tolerance applied to every round of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub round_duration_secs: u32,
    /// Fraction of word length tolerated as edit distance, in (0, 1).
    pub match_threshold: f64,
}

impl DifficultyProfile {
    /// Same tolerance with a different time limit.
    pub fn with_duration(self, secs: u32) -> Result<Self, GameError> {
        if secs == 0 {
            return Err(GameError::ZeroDuration);
        }
        Ok(Self {
            round_duration_secs: secs,
            ..self
        })
    }
}
