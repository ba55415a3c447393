use std::time::Duration;

use super::recognition_event::{ErrorClass, RecognitionEvent};
use super::speech_recognizer::{RecognizerError, StreamingRecognizer};
use super::window_tracker::WindowTracker;
use crate::scheduling::domain::timer::{Timer, TimerHandle, TimerPurpose};

/// Lifecycle of the underlying recognition stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Starting,
    Listening,
    Ending,
    Error,
}

/// Microphone status reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicStatus {
    Listening,
    /// A transient error occurred; the stream keeps restarting.
    StillListening,
    /// Permission was refused. No automatic restarts until the caller retries.
    Blocked,
    Off,
}

/// What a recognizer event means for the round in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutput {
    /// Current text of the round's transcript window.
    Transcript(String),
    Status(MicStatus),
    PermissionDenied,
}

/// Turns a self-terminating streaming recognizer into a continuous
/// transcript feed.
///
/// When the stream ends on its own while the session is active, a restart
/// is scheduled after a short debounce. At most one restart is ever in
/// flight: further stream-end events are ignored until the recognizer
/// confirms it started again.
pub struct RecognitionSession {
    recognizer: Box<dyn StreamingRecognizer>,
    tracker: WindowTracker,
    state: SessionState,
    active: bool,
    restart_in_flight: bool,
    restart_handle: Option<TimerHandle>,
    permission_denied: bool,
    debounce: Duration,
    restarts: usize,
}

impl RecognitionSession {
    pub fn new(recognizer: Box<dyn StreamingRecognizer>, debounce: Duration) -> Self {
        Self {
            recognizer,
            tracker: WindowTracker::new(),
            state: SessionState::Idle,
            active: false,
            restart_in_flight: false,
            restart_handle: None,
            permission_denied: false,
            debounce,
            restarts: 0,
        }
    }

    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Explicit start request. Also serves as the caller's retry after a
    /// permission failure.
    pub fn start(&mut self, timer: &mut dyn Timer) -> Result<(), RecognizerError> {
        self.active = true;
        self.permission_denied = false;
        if let Some(handle) = self.restart_handle.take() {
            timer.cancel(handle);
        }
        self.restart_in_flight = false;

        if matches!(self.state, SessionState::Starting | SessionState::Listening) {
            return Ok(());
        }
        self.launch()
    }

    /// Stops listening for good. The restart guard is cleared before the
    /// stream is torn down so a late stream-end cannot schedule a restart.
    pub fn stop(&mut self, timer: &mut dyn Timer) {
        self.restart_in_flight = false;
        if let Some(handle) = self.restart_handle.take() {
            timer.cancel(handle);
        }
        self.active = false;

        if self.state != SessionState::Idle {
            self.recognizer.abort();
        }
        self.tracker.clear();
        self.state = SessionState::Idle;
        log::debug!("Recognition session stopped");
    }

    /// Begins a new transcript window for the next round. The live stream
    /// is left running.
    pub fn reset_window(&mut self) {
        self.tracker.reset_window();
    }

    pub fn handle_event(
        &mut self,
        event: RecognitionEvent,
        timer: &mut dyn Timer,
    ) -> Option<SessionOutput> {
        match event {
            RecognitionEvent::Started => {
                self.state = SessionState::Listening;
                self.restart_in_flight = false;
                self.tracker.start_generation();
                log::debug!("Recognition stream started");
                Some(SessionOutput::Status(MicStatus::Listening))
            }
            RecognitionEvent::Result {
                index,
                alternatives,
                is_final,
            } => {
                if !self.active {
                    return None;
                }
                let text = alternatives
                    .first()
                    .map(|alt| alt.transcript.as_str())
                    .unwrap_or_default();
                log::debug!("Recognition result {index} (final: {is_final}): {text:?}");
                self.tracker
                    .observe(index, text)
                    .map(SessionOutput::Transcript)
            }
            RecognitionEvent::Error(code) => match code.class() {
                ErrorClass::Intentional => None,
                ErrorClass::Transient => {
                    log::warn!("Recognition error ({code}); still listening");
                    self.state = SessionState::Error;
                    Some(SessionOutput::Status(MicStatus::StillListening))
                }
                ErrorClass::Fatal => {
                    log::error!("Recognition error ({code}); automatic restarts disabled");
                    self.state = SessionState::Error;
                    self.permission_denied = true;
                    Some(SessionOutput::PermissionDenied)
                }
                ErrorClass::Unclassified => {
                    log::warn!("Recognition error ({code})");
                    self.state = SessionState::Error;
                    None
                }
            },
            RecognitionEvent::Ended => {
                self.on_stream_ended(timer);
                None
            }
        }
    }

    /// Called when a `RecognizerRestart` timer fires. Handles that are not
    /// the pending restart are ignored.
    pub fn on_restart_due(&mut self, handle: TimerHandle) -> Result<(), RecognizerError> {
        if self.restart_handle != Some(handle) {
            return Ok(());
        }
        self.restart_handle = None;

        if !self.active || self.permission_denied {
            self.restart_in_flight = false;
            self.state = SessionState::Idle;
            return Ok(());
        }
        if matches!(self.state, SessionState::Starting | SessionState::Listening) {
            self.restart_in_flight = false;
            return Ok(());
        }

        self.restarts += 1;
        log::debug!("Restarting recognition stream (restart #{})", self.restarts);
        self.launch()
    }

    fn on_stream_ended(&mut self, timer: &mut dyn Timer) {
        let previous = std::mem::replace(&mut self.state, SessionState::Ending);

        if !self.active || self.permission_denied {
            self.state = SessionState::Idle;
            return;
        }
        // A relaunched stream that ends before confirming it started
        // completes the in-flight restart; another one is due.
        let relaunch_died = self.restart_handle.is_none()
            && matches!(previous, SessionState::Starting | SessionState::Error);
        if self.restart_in_flight && !relaunch_died {
            return;
        }

        self.restart_in_flight = true;
        self.restart_handle = Some(timer.schedule(self.debounce, TimerPurpose::RecognizerRestart));
        log::debug!("Recognition stream ended; restart in {:?}", self.debounce);
    }

    fn launch(&mut self) -> Result<(), RecognizerError> {
        match self.recognizer.start() {
            Ok(()) => {
                self.state = SessionState::Starting;
                Ok(())
            }
            Err(RecognizerError::AlreadyStarted) => {
                self.state = SessionState::Listening;
                self.restart_in_flight = false;
                Ok(())
            }
            Err(e) => {
                self.restart_in_flight = false;
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn permission_denied(&self) -> bool {
        self.permission_denied
    }

    pub fn restart_in_flight(&self) -> bool {
        self.restart_in_flight
    }

    /// Number of automatic restarts issued so far.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    pub fn tracker(&self) -> &WindowTracker {
        &self.tracker
    }
}
