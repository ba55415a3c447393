pub mod channel_recognizer;
