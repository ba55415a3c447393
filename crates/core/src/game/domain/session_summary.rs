use serde::{Deserialize, Serialize};

use super::score_board::ScoreBoard;

/// Overall verdict shown at the end of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreRating {
    Perfect,
    Star,
    Great,
    Good,
    KeepPracticing,
}

impl ScoreRating {
    pub fn from_fraction(fraction: f64) -> Self {
        let pct = fraction * 100.0;
        if pct >= 100.0 {
            ScoreRating::Perfect
        } else if pct >= 80.0 {
            ScoreRating::Star
        } else if pct >= 60.0 {
            ScoreRating::Great
        } else if pct >= 40.0 {
            ScoreRating::Good
        } else {
            ScoreRating::KeepPracticing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreRating::Perfect => "Perfect! You're a Reading Superstar!",
            ScoreRating::Star => "Amazing work! You're a Reading Star!",
            ScoreRating::Great => "Great job! Keep practicing!",
            ScoreRating::Good => "Good effort! Practice makes perfect!",
            ScoreRating::KeepPracticing => "Nice try! Let's practice more!",
        }
    }
}

/// Final tally reported when a session finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub total: usize,
    pub skipped: u32,
    pub best_streak: u32,
    pub missed_words: Vec<String>,
    pub accuracy_percent: u32,
    pub rating: ScoreRating,
}

impl SessionSummary {
    pub fn new(board: &ScoreBoard, total: usize) -> Self {
        let fraction = if total == 0 {
            0.0
        } else {
            board.score() as f64 / total as f64
        };
        Self {
            score: board.score(),
            total,
            skipped: board.skipped(),
            best_streak: board.best_streak(),
            missed_words: board.missed_words().to_vec(),
            accuracy_percent: (fraction * 100.0).round() as u32,
            rating: ScoreRating::from_fraction(fraction),
        }
    }
}
