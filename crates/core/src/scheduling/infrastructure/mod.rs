pub mod manual_timer;
pub mod thread_timer;
