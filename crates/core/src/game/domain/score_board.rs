use crate::shared::constants::{SCORE_MILESTONES, STREAK_TIERS, STRUGGLING_MISSES};

/// Score, streak and miss bookkeeping across the rounds of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
    skipped: u32,
    streak: u32,
    best_streak: u32,
    misses_in_a_row: u32,
    missed_words: Vec<String>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a correct answer and returns the new streak.
    pub fn record_correct(&mut self) -> u32 {
        self.score += 1;
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
        self.misses_in_a_row = 0;
        self.streak
    }

    /// Records a timeout or skip. Returns `true` when the learner has now
    /// missed several rounds in a row.
    pub fn record_miss(&mut self, target: &str) -> bool {
        self.missed_words.push(target.to_string());
        self.streak = 0;
        self.misses_in_a_row += 1;
        self.skipped += 1;
        self.misses_in_a_row >= STRUGGLING_MISSES
    }

    /// Streak tier reached by the current streak, if it just hit one.
    pub fn streak_tier(&self) -> Option<u32> {
        STREAK_TIERS.contains(&self.streak).then_some(self.streak)
    }

    /// Score milestone reached by the current score, if it just hit one.
    pub fn milestone(&self) -> Option<u32> {
        SCORE_MILESTONES.contains(&self.score).then_some(self.score)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn misses_in_a_row(&self) -> u32 {
        self.misses_in_a_row
    }

    pub fn missed_words(&self) -> &[String] {
        &self.missed_words
    }
}
