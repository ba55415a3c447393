use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognizerError {
    #[error("recognizer is already started")]
    AlreadyStarted,
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),
}

/// Domain interface for a continuous, self-terminating speech recognizer.
///
/// Implementations report everything else (start confirmation, results,
/// errors, stream end) asynchronously as
/// [`RecognitionEvent`](super::recognition_event::RecognitionEvent)s.
/// The stream may end at any time without being asked to.
pub trait StreamingRecognizer: Send {
    fn start(&mut self) -> Result<(), RecognizerError>;

    /// Terminates the stream immediately, discarding in-flight partial results.
    fn abort(&mut self);
}
