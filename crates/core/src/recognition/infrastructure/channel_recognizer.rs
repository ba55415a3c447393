use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::Sender;

use crate::recognition::domain::recognition_event::{RecognitionErrorCode, RecognitionEvent};
use crate::recognition::domain::speech_recognizer::{RecognizerError, StreamingRecognizer};
use crate::runtime::game_event::GameEvent;

#[derive(Default)]
struct StreamState {
    running: bool,
    next_index: usize,
}

struct Shared {
    events: Sender<GameEvent>,
    stream: Mutex<StreamState>,
    /// Results after which the stream ends by itself; 0 never ends.
    results_per_stream: usize,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, StreamState> {
        self.stream.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, event: RecognitionEvent) -> bool {
        self.events.send(GameEvent::Recognition(event)).is_ok()
    }
}

/// Recognizer adapter fed with already-transcribed text.
///
/// Behaves like a browser-style continuous recognizer: results carry a
/// per-stream index starting at zero, the stream ends by itself after
/// `results_per_stream` results, and text pushed while no stream is
/// running is lost. All events are posted to the game's event channel.
pub struct ChannelRecognizer {
    shared: Arc<Shared>,
}

/// Producer half of a [`ChannelRecognizer`], usable from another thread.
#[derive(Clone)]
pub struct TranscriptFeeder {
    shared: Arc<Shared>,
}

impl ChannelRecognizer {
    pub fn new(events: Sender<GameEvent>, results_per_stream: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                events,
                stream: Mutex::new(StreamState::default()),
                results_per_stream,
            }),
        }
    }

    pub fn feeder(&self) -> TranscriptFeeder {
        TranscriptFeeder {
            shared: self.shared.clone(),
        }
    }
}

impl StreamingRecognizer for ChannelRecognizer {
    fn start(&mut self) -> Result<(), RecognizerError> {
        let mut stream = self.shared.lock();
        if stream.running {
            return Err(RecognizerError::AlreadyStarted);
        }
        if !self.shared.send(RecognitionEvent::Started) {
            return Err(RecognizerError::Unavailable("event channel closed".into()));
        }
        stream.running = true;
        stream.next_index = 0;
        Ok(())
    }

    fn abort(&mut self) {
        let mut stream = self.shared.lock();
        if !stream.running {
            return;
        }
        stream.running = false;
        self.shared
            .send(RecognitionEvent::Error(RecognitionErrorCode::Aborted));
        self.shared.send(RecognitionEvent::Ended);
    }
}

impl TranscriptFeeder {
    /// Pushes one final result into the running stream. Returns `false` if
    /// no stream was running and the text was dropped.
    pub fn push(&self, text: &str) -> bool {
        let mut stream = self.shared.lock();
        if !stream.running {
            log::warn!("Recognizer not listening; dropped {text:?}");
            return false;
        }

        let index = stream.next_index;
        stream.next_index += 1;
        self.shared
            .send(RecognitionEvent::transcript(index, text, true));

        if self.shared.results_per_stream > 0 && stream.next_index >= self.shared.results_per_stream {
            stream.running = false;
            self.shared.send(RecognitionEvent::Ended);
        }
        true
    }

    /// Reports a recognizer error, ending the stream as real engines do.
    pub fn fail(&self, code: RecognitionErrorCode) {
        let mut stream = self.shared.lock();
        self.shared.send(RecognitionEvent::Error(code));
        if stream.running {
            stream.running = false;
            self.shared.send(RecognitionEvent::Ended);
        }
    }
}
