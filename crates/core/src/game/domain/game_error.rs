use thiserror::Error;

use crate::recognition::domain::speech_recognizer::RecognizerError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("phrase list is empty")]
    EmptyPhraseList,
    #[error("phrase has no words: {0:?}")]
    EmptyPhrase(String),
    #[error("unknown difficulty: {0:?} (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    #[error("round duration must be at least one second")]
    ZeroDuration,
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("game is not running")]
    NotStarted,
    #[error("game has already started")]
    AlreadyStarted,
    #[error(transparent)]
    Recognizer(#[from] RecognizerError),
}
