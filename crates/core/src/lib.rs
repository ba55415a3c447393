pub mod game;
pub mod matching;
pub mod recognition;
pub mod runtime;
pub mod scheduling;
pub mod shared;
