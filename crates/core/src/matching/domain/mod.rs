pub mod edit_distance;
pub mod match_engine;
pub mod phonetic_rules;
pub mod text_normalizer;
