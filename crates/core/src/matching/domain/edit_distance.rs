/// Levenshtein distance over Unicode scalar values with unit costs.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}
