/// Lowercases, strips punctuation, and collapses whitespace runs to single spaces.
///
/// Letters, digits and underscores survive; everything else that is not
/// whitespace is removed outright, so `"Don't!"` becomes `"dont"`.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes `text` and splits it into word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
