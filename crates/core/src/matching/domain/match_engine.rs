use super::edit_distance::edit_distance;
use super::phonetic_rules::phonetically_close;
use super::text_normalizer::{normalize, tokenize};

/// Outcome of comparing one spoken attempt against a target phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: bool,
    /// Leading target words matched so far. Feedback only, never scored.
    pub matched_words: usize,
    pub target_words: usize,
}

impl MatchResult {
    pub fn is_sentence(&self) -> bool {
        self.target_words > 1
    }
}

/// Decides whether a spoken transcript is an acceptable reading of a target.
///
/// Every function here is pure: the verdict depends only on the spoken text,
/// the target text and the tolerance threshold.
pub struct MatchEngine;

impl MatchEngine {
    /// True if two already-normalized words are equal, within the scaled
    /// edit budget, or phonetically close.
    ///
    /// The budget is `max(2, ceil(min_len * threshold))`.
    pub fn words_similar(w1: &str, w2: &str, threshold: f64) -> bool {
        if w1 == w2 {
            return true;
        }

        let shorter = w1.chars().count().min(w2.chars().count());
        if edit_distance(w1, w2) <= distance_budget(shorter, threshold, 2) {
            return true;
        }

        phonetically_close(w1, w2)
    }

    pub fn is_match(spoken: &str, target: &str, threshold: f64) -> bool {
        Self::evaluate(spoken, target, threshold).matched
    }

    /// Full comparison including sentence progress.
    pub fn evaluate(spoken: &str, target: &str, threshold: f64) -> MatchResult {
        let target_tokens = tokenize(target);
        let spoken_tokens = tokenize(spoken);

        match target_tokens.len() {
            0 => MatchResult {
                matched: false,
                matched_words: 0,
                target_words: 0,
            },
            1 => {
                let matched = Self::single_word_match(spoken, &spoken_tokens, target, threshold);
                MatchResult {
                    matched,
                    matched_words: usize::from(matched),
                    target_words: 1,
                }
            }
            n => {
                let matched_words = Self::sentence_progress(&spoken_tokens, &target_tokens, threshold);
                MatchResult {
                    matched: spoken_tokens.len() >= n && matched_words == n,
                    matched_words,
                    target_words: n,
                }
            }
        }
    }

    /// Counts target words matched in order, each by a distinct, strictly
    /// later spoken word. Spoken filler between them is skipped over.
    fn sentence_progress(spoken: &[String], target: &[String], threshold: f64) -> usize {
        let mut cursor = 0;
        for word in spoken {
            if cursor == target.len() {
                break;
            }
            if Self::words_similar(word, &target[cursor], threshold) {
                cursor += 1;
            }
        }
        cursor
    }

    fn single_word_match(spoken: &str, spoken_tokens: &[String], target: &str, threshold: f64) -> bool {
        let target = normalize(target);
        if normalize(spoken).contains(&target) {
            return true;
        }

        let budget = distance_budget(target.chars().count(), threshold, 1);
        spoken_tokens
            .iter()
            .any(|word| edit_distance(word, &target) <= budget || phonetically_close(word, &target))
    }
}

fn distance_budget(len: usize, threshold: f64, floor: usize) -> usize {
    ((len as f64 * threshold).ceil() as usize).max(floor)
}
