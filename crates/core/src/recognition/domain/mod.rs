pub mod recognition_event;
pub mod recognition_session;
pub mod speech_recognizer;
pub mod window_tracker;
