pub mod log_round_observer;
