use crate::recognition::domain::recognition_event::RecognitionEvent;
use crate::scheduling::domain::timer::TimerFired;

/// Everything that can happen to a running game, serialized into one stream.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Recognition(RecognitionEvent),
    Timer(TimerFired),
    Skip,
    /// Caller retry after microphone access was denied.
    ResumeListening,
    Stop,
}
