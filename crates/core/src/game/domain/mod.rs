pub mod difficulty;
pub mod game_error;
pub mod phrase;
pub mod round_controller;
pub mod round_event;
pub mod round_observer;
pub mod round_state;
pub mod score_board;
pub mod session_summary;
