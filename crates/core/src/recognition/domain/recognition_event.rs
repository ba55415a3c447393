/// One candidate transcription for a recognizer result.
#[derive(Clone, Debug, PartialEq)]
pub struct Alternative {
    pub transcript: String,
    pub confidence: f32,
}

/// Error codes reported by a streaming recognizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionErrorCode {
    Aborted,
    NoSpeech,
    AudioCapture,
    NotAllowed,
    Other(String),
}

/// How the session reacts to an error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caused by our own `abort()`; not an error at all.
    Intentional,
    /// Reported as status; the stream restarts once it ends.
    Transient,
    /// Stops automatic restarts until the caller intervenes.
    Fatal,
    /// Logged only; the stream restarts once it ends.
    Unclassified,
}

impl RecognitionErrorCode {
    /// Parses the wire code used by browser-style recognizers
    /// (`"no-speech"`, `"not-allowed"`, ...).
    pub fn parse(code: &str) -> Self {
        match code {
            "aborted" => Self::Aborted,
            "no-speech" => Self::NoSpeech,
            "audio-capture" => Self::AudioCapture,
            "not-allowed" => Self::NotAllowed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Aborted => ErrorClass::Intentional,
            Self::NoSpeech | Self::AudioCapture => ErrorClass::Transient,
            Self::NotAllowed => ErrorClass::Fatal,
            Self::Other(_) => ErrorClass::Unclassified,
        }
    }
}

impl std::fmt::Display for RecognitionErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aborted => write!(f, "aborted"),
            Self::NoSpeech => write!(f, "no-speech"),
            Self::AudioCapture => write!(f, "audio-capture"),
            Self::NotAllowed => write!(f, "not-allowed"),
            Self::Other(code) => write!(f, "{code}"),
        }
    }
}

/// Lifecycle and result events emitted by a streaming recognizer.
///
/// `index` increases monotonically for the life of one underlying stream
/// and starts again from zero when the stream is restarted.
#[derive(Clone, Debug, PartialEq)]
pub enum RecognitionEvent {
    Started,
    Result {
        index: usize,
        alternatives: Vec<Alternative>,
        is_final: bool,
    },
    Error(RecognitionErrorCode),
    Ended,
}

impl RecognitionEvent {
    /// Convenience constructor for a result with a single alternative.
    pub fn transcript(index: usize, text: &str, is_final: bool) -> Self {
        Self::Result {
            index,
            alternatives: vec![Alternative {
                transcript: text.to_string(),
                confidence: 1.0,
            }],
            is_final,
        }
    }
}
