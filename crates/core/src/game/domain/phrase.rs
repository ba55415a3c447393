use rand::seq::SliceRandom;
use rand::Rng;

use super::game_error::GameError;
use crate::matching::domain::text_normalizer::tokenize;

/// A word or sentence the learner must read aloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPhrase {
    text: String,
    tokens: Vec<String>,
}

impl TargetPhrase {
    pub fn new(text: &str) -> Result<Self, GameError> {
        let text = text.trim();
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Err(GameError::EmptyPhrase(text.to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            tokens,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_sentence(&self) -> bool {
        self.tokens.len() > 1
    }
}

/// Ordered, non-empty list of phrases for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseList {
    phrases: Vec<TargetPhrase>,
}

impl PhraseList {
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Result<Self, GameError> {
        if phrases.is_empty() {
            return Err(GameError::EmptyPhraseList);
        }
        let phrases = phrases
            .iter()
            .map(|p| TargetPhrase::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { phrases })
    }

    /// One phrase per line; surrounding whitespace is trimmed and blank
    /// lines are skipped.
    pub fn from_lines(text: &str) -> Result<Self, GameError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::new(&lines)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.phrases.shuffle(rng);
    }

    pub fn get(&self, index: usize) -> Option<&TargetPhrase> {
        self.phrases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetPhrase> {
        self.phrases.iter()
    }
}
