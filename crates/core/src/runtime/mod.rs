pub mod game_event;
pub mod game_loop;
