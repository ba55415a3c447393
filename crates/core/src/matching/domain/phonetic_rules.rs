//! Substitutions that early readers commonly make when sounding out words.
//!
//! Each rule is a pair of spellings that may stand in for one another.
//! Rules are tried in table order and in both directions.

use super::edit_distance::edit_distance;

pub const CHILD_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("th", "d"),
    ("th", "f"),
    ("r", "w"),
    ("l", "w"),
    ("s", "th"),
    ("ch", "sh"),
    ("j", "ch"),
    ("v", "b"),
    ("ing", "in"),
];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Minimum skeleton length for the consonant-skeleton rule to apply.
const MIN_SKELETON_LEN: usize = 2;

/// True if one word is a plausible mispronunciation of the other.
///
/// A substitution rule applied to either word (in either direction) must
/// land within edit distance 1 of the other word, or both words must share
/// the same consonant skeleton of at least two letters.
pub fn phonetically_close(a: &str, b: &str) -> bool {
    for &(left, right) in CHILD_SUBSTITUTIONS {
        for (from, to) in [(left, right), (right, left)] {
            if rewrite_lands_near(a, b, from, to) || rewrite_lands_near(b, a, from, to) {
                return true;
            }
        }
    }

    let skeleton = consonant_skeleton(a);
    skeleton.chars().count() >= MIN_SKELETON_LEN && skeleton == consonant_skeleton(b)
}

/// The word with its vowels removed.
pub fn consonant_skeleton(word: &str) -> String {
    word.chars().filter(|c| !VOWELS.contains(c)).collect()
}

fn rewrite_lands_near(source: &str, other: &str, from: &str, to: &str) -> bool {
    edit_distance(&source.replace(from, to), other) <= 1
}
