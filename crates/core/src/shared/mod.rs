pub mod constants;
pub mod settings;
pub mod word_lists;
