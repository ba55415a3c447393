use std::time::Duration;

use super::difficulty::DifficultyProfile;
use super::game_error::GameError;
use super::phrase::PhraseList;
use super::round_event::RoundEvent;
use super::round_observer::RoundObserver;
use super::round_state::{RoundOutcome, RoundState};
use super::score_board::ScoreBoard;
use super::session_summary::SessionSummary;
use crate::matching::domain::match_engine::MatchEngine;
use crate::recognition::domain::recognition_event::RecognitionEvent;
use crate::recognition::domain::recognition_session::{
    MicStatus, RecognitionSession, SessionOutput, SessionState,
};
use crate::recognition::domain::speech_recognizer::StreamingRecognizer;
use crate::runtime::game_event::GameEvent;
use crate::scheduling::domain::timer::{Timer, TimerFired, TimerHandle, TimerPurpose};
use crate::shared::constants::{
    CORRECT_ADVANCE_DELAY_MS, COUNTDOWN_TICK_MS, RESTART_DEBOUNCE_MS, SKIP_ADVANCE_DELAY_MS,
    TICK_WARNING_SECS, TIMEOUT_ADVANCE_DELAY_MS,
};

/// Pauses between round transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundDelays {
    pub after_correct: Duration,
    pub after_timeout: Duration,
    pub after_skip: Duration,
    pub restart_debounce: Duration,
    pub tick: Duration,
}

impl Default for RoundDelays {
    fn default() -> Self {
        Self {
            after_correct: Duration::from_millis(CORRECT_ADVANCE_DELAY_MS),
            after_timeout: Duration::from_millis(TIMEOUT_ADVANCE_DELAY_MS),
            after_skip: Duration::from_millis(SKIP_ADVANCE_DELAY_MS),
            restart_debounce: Duration::from_millis(RESTART_DEBOUNCE_MS),
            tick: Duration::from_millis(COUNTDOWN_TICK_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Ready,
    Playing,
    Finished,
    Stopped,
}

/// Runs a practice session one round at a time.
///
/// Transcripts and timer firings arrive as [`GameEvent`]s through
/// [`handle`](Self::handle), which is the only transition function. Once a
/// round's outcome is latched, every later transcript or tick for that round
/// is ignored, and once the session is finished or stopped every event is.
pub struct RoundController {
    phrases: PhraseList,
    profile: DifficultyProfile,
    delays: RoundDelays,
    session: RecognitionSession,
    timer: Box<dyn Timer>,
    observer: Box<dyn RoundObserver>,
    board: ScoreBoard,
    index: usize,
    round: Option<RoundState>,
    tick_handle: Option<TimerHandle>,
    advance_handle: Option<TimerHandle>,
    phase: ControllerPhase,
}

impl RoundController {
    pub fn new(
        phrases: PhraseList,
        profile: DifficultyProfile,
        recognizer: Box<dyn StreamingRecognizer>,
        timer: Box<dyn Timer>,
        observer: Box<dyn RoundObserver>,
    ) -> Self {
        let delays = RoundDelays::default();
        Self {
            phrases,
            profile,
            delays,
            session: RecognitionSession::new(recognizer, delays.restart_debounce),
            timer,
            observer,
            board: ScoreBoard::new(),
            index: 0,
            round: None,
            tick_handle: None,
            advance_handle: None,
            phase: ControllerPhase::Ready,
        }
    }

    pub fn with_delays(mut self, delays: RoundDelays) -> Self {
        self.session.set_debounce(delays.restart_debounce);
        self.delays = delays;
        self
    }

    /// Shows the first phrase and starts listening.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase != ControllerPhase::Ready {
            return Err(GameError::AlreadyStarted);
        }
        self.phase = ControllerPhase::Playing;
        log::info!(
            "Starting session: {} phrases, {}s per round, threshold {}",
            self.phrases.len(),
            self.profile.round_duration_secs,
            self.profile.match_threshold
        );

        self.present_current();
        if let Err(e) = self.session.start(self.timer.as_mut()) {
            self.teardown(ControllerPhase::Stopped);
            return Err(e.into());
        }
        Ok(())
    }

    pub fn handle(&mut self, event: GameEvent) -> Result<(), GameError> {
        if self.phase != ControllerPhase::Playing {
            log::debug!("Ignoring {event:?} while {:?}", self.phase);
            return Ok(());
        }

        match event {
            GameEvent::Recognition(event) => self.on_recognition(event),
            GameEvent::Timer(fired) => self.on_timer(fired),
            GameEvent::Skip => {
                self.skip();
                Ok(())
            }
            GameEvent::ResumeListening => self.resume_listening(),
            GameEvent::Stop => {
                self.stop();
                Ok(())
            }
        }
    }

    /// Gives up on the current round.
    pub fn skip(&mut self) {
        if self.phase == ControllerPhase::Playing {
            self.resolve_miss(RoundOutcome::Skipped);
        }
    }

    /// Tears the session down mid-game. No restart is scheduled afterwards
    /// and no later event can resolve a round.
    pub fn stop(&mut self) {
        if self.phase == ControllerPhase::Playing {
            log::info!("Session stopped at round {}", self.index + 1);
            self.teardown(ControllerPhase::Stopped);
        }
    }

    /// Caller retry after a permission failure.
    pub fn resume_listening(&mut self) -> Result<(), GameError> {
        if self.phase != ControllerPhase::Playing {
            return Err(GameError::NotStarted);
        }
        self.session.start(self.timer.as_mut())?;
        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(&self.board, self.phrases.len())
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self.phase,
            ControllerPhase::Finished | ControllerPhase::Stopped
        )
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.profile
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    fn on_recognition(&mut self, event: RecognitionEvent) -> Result<(), GameError> {
        match self.session.handle_event(event, self.timer.as_mut()) {
            None => Ok(()),
            Some(SessionOutput::Transcript(text)) => {
                self.check_answer(&text);
                Ok(())
            }
            Some(SessionOutput::Status(status)) => {
                self.emit(RoundEvent::Microphone(status));
                Ok(())
            }
            Some(SessionOutput::PermissionDenied) => {
                self.emit(RoundEvent::Microphone(MicStatus::Blocked));
                Err(GameError::PermissionDenied)
            }
        }
    }

    fn on_timer(&mut self, fired: TimerFired) -> Result<(), GameError> {
        match fired.purpose {
            TimerPurpose::CountdownTick => {
                if self.tick_handle == Some(fired.handle) {
                    self.tick_handle = None;
                    self.on_tick();
                }
            }
            TimerPurpose::AdvanceRound => {
                if self.advance_handle == Some(fired.handle) {
                    self.advance_handle = None;
                    self.index += 1;
                    self.present_current();
                }
            }
            TimerPurpose::RecognizerRestart => self.session.on_restart_due(fired.handle)?,
        }
        Ok(())
    }

    fn check_answer(&mut self, transcript: &str) {
        let threshold = self.profile.match_threshold;
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if !round.is_pending() {
            log::debug!("Round already resolved; ignoring {transcript:?}");
            return;
        }

        let result = MatchEngine::evaluate(transcript, round.target().text(), threshold);
        round.set_matched_word_count(result.matched_words);

        self.emit(RoundEvent::Heard {
            transcript: transcript.to_string(),
        });
        if result.is_sentence() {
            self.emit(RoundEvent::Progress {
                matched: result.matched_words,
                total: result.target_words,
            });
        }
        if result.matched {
            self.resolve_correct();
        }
    }

    fn on_tick(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if !round.is_pending() {
            return;
        }

        let remaining = round.tick();
        self.emit(RoundEvent::Tick {
            remaining_secs: remaining,
            warning: remaining > 0 && remaining <= TICK_WARNING_SECS,
        });

        if remaining == 0 {
            self.resolve_miss(RoundOutcome::TimedOut);
        } else {
            self.tick_handle = Some(
                self.timer
                    .schedule(self.delays.tick, TimerPurpose::CountdownTick),
            );
        }
    }

    fn resolve_correct(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if !round.resolve(RoundOutcome::Correct) {
            return;
        }
        let target = round.target().text().to_string();
        self.cancel_tick();

        let streak = self.board.record_correct();
        log::info!(
            "Correct: {target:?} (score {}, streak {streak})",
            self.board.score()
        );
        self.emit(RoundEvent::Correct {
            target,
            score: self.board.score(),
            streak,
            streak_tier: self.board.streak_tier(),
            milestone: self.board.milestone(),
        });
        self.schedule_advance(self.delays.after_correct);
    }

    fn resolve_miss(&mut self, outcome: RoundOutcome) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if !round.resolve(outcome) {
            return;
        }
        let target = round.target().text().to_string();
        self.cancel_tick();

        let struggling = self.board.record_miss(&target);
        let (event, delay) = if outcome == RoundOutcome::TimedOut {
            log::info!("Time's up: {target:?}");
            (
                RoundEvent::TimedOut { target, struggling },
                self.delays.after_timeout,
            )
        } else {
            log::info!("Skipped: {target:?}");
            (
                RoundEvent::Skipped { target, struggling },
                self.delays.after_skip,
            )
        };
        self.emit(event);
        self.schedule_advance(delay);
    }

    fn present_current(&mut self) {
        let Some(target) = self.phrases.get(self.index).cloned() else {
            self.finish();
            return;
        };

        self.session.reset_window();
        let time_limit = self.profile.round_duration_secs;
        log::debug!(
            "Round {}/{}: {:?}",
            self.index + 1,
            self.phrases.len(),
            target.text()
        );
        self.emit(RoundEvent::WordShown {
            index: self.index,
            total: self.phrases.len(),
            target: target.text().to_string(),
            time_limit_secs: time_limit,
        });
        self.round = Some(RoundState::new(self.index, target, time_limit));
        self.tick_handle = Some(
            self.timer
                .schedule(self.delays.tick, TimerPurpose::CountdownTick),
        );
    }

    fn finish(&mut self) {
        self.teardown(ControllerPhase::Finished);
        let summary = self.summary();
        log::info!(
            "Session finished: {}/{} correct, best streak {}",
            summary.score,
            summary.total,
            summary.best_streak
        );
        self.emit(RoundEvent::Finished(summary));
    }

    fn teardown(&mut self, phase: ControllerPhase) {
        self.phase = phase;
        self.cancel_tick();
        if let Some(handle) = self.advance_handle.take() {
            self.timer.cancel(handle);
        }
        self.session.stop(self.timer.as_mut());
        self.emit(RoundEvent::Microphone(MicStatus::Off));
    }

    fn schedule_advance(&mut self, delay: Duration) {
        self.advance_handle = Some(self.timer.schedule(delay, TimerPurpose::AdvanceRound));
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.timer.cancel(handle);
        }
    }

    fn emit(&mut self, event: RoundEvent) {
        self.observer.on_event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::domain::difficulty::Difficulty;
    use crate::game::domain::round_observer::NullRoundObserver;
    use crate::recognition::domain::recognition_event::RecognitionErrorCode;
    use crate::recognition::domain::speech_recognizer::RecognizerError;
    use crate::scheduling::infrastructure::manual_timer::ManualTimer;
    use std::sync::{Arc, Mutex};

    // ─── Stubs ───

    #[derive(Default)]
    struct RecognizerCalls {
        starts: usize,
        aborts: usize,
    }

    struct StubRecognizer {
        calls: Arc<Mutex<RecognizerCalls>>,
    }

    impl StreamingRecognizer for StubRecognizer {
        fn start(&mut self) -> Result<(), RecognizerError> {
            self.calls.lock().unwrap().starts += 1;
            Ok(())
        }

        fn abort(&mut self) {
            self.calls.lock().unwrap().aborts += 1;
        }
    }

    struct FailingRecognizer;

    impl StreamingRecognizer for FailingRecognizer {
        fn start(&mut self) -> Result<(), RecognizerError> {
            Err(RecognizerError::Unavailable("no microphone".to_string()))
        }

        fn abort(&mut self) {}
    }

    #[derive(Clone, Default)]
    struct RecordingObserver {
        events: Arc<Mutex<Vec<RoundEvent>>>,
    }

    impl RoundObserver for RecordingObserver {
        fn on_event(&mut self, event: &RoundEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    struct Harness {
        controller: RoundController,
        timer: ManualTimer,
        calls: Arc<Mutex<RecognizerCalls>>,
        events: Arc<Mutex<Vec<RoundEvent>>>,
    }

    impl Harness {
        fn new(phrases: &[&str], difficulty: Difficulty) -> Self {
            Self::with_delays(phrases, difficulty, RoundDelays::default())
        }

        fn with_delays(phrases: &[&str], difficulty: Difficulty, delays: RoundDelays) -> Self {
            let timer = ManualTimer::new();
            let calls = Arc::new(Mutex::new(RecognizerCalls::default()));
            let observer = RecordingObserver::default();
            let events = observer.events.clone();
            let controller = RoundController::new(
                PhraseList::new(phrases).unwrap(),
                difficulty.profile(),
                Box::new(StubRecognizer {
                    calls: calls.clone(),
                }),
                Box::new(timer.clone()),
                Box::new(observer),
            )
            .with_delays(delays);
            Self {
                controller,
                timer,
                calls,
                events,
            }
        }

        /// Starts the session and confirms the stream came up.
        fn started(phrases: &[&str], difficulty: Difficulty) -> Self {
            let mut harness = Self::new(phrases, difficulty);
            harness.controller.start().unwrap();
            harness.recognition(RecognitionEvent::Started).unwrap();
            harness
        }

        fn recognition(&mut self, event: RecognitionEvent) -> Result<(), GameError> {
            self.controller.handle(GameEvent::Recognition(event))
        }

        fn say(&mut self, index: usize, text: &str) {
            self.recognition(RecognitionEvent::transcript(index, text, true))
                .unwrap();
        }

        fn advance(&mut self, millis: u64) {
            let controller = &mut self.controller;
            self.timer.advance(Duration::from_millis(millis), |fired| {
                controller.handle(GameEvent::Timer(fired)).unwrap();
            });
        }

        fn events(&self) -> Vec<RoundEvent> {
            self.events.lock().unwrap().clone()
        }

        fn count(&self, pred: impl Fn(&RoundEvent) -> bool) -> usize {
            self.events().iter().filter(|e| pred(e)).count()
        }
    }

    // ─── End to end ───

    #[test]
    fn test_correct_then_timeout_then_summary() {
        let mut h = Harness::started(&["cat", "the dog is big"], Difficulty::Easy);

        h.say(0, "cat");
        assert_eq!(h.controller.board().score(), 1);
        assert_eq!(h.controller.board().streak(), 1);
        assert_eq!(h.controller.round().unwrap().outcome(), RoundOutcome::Correct);

        h.advance(1200);
        assert_eq!(h.controller.round().unwrap().index(), 1);
        assert_eq!(h.controller.round().unwrap().time_remaining(), 20);

        h.advance(20_000);
        assert_eq!(h.controller.round().unwrap().outcome(), RoundOutcome::TimedOut);
        assert_eq!(h.controller.board().missed_words(), ["the dog is big"]);
        assert_eq!(h.controller.board().streak(), 0);

        h.advance(1500);
        assert_eq!(h.controller.phase(), ControllerPhase::Finished);
        let summary = h.controller.summary();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(
            h.events().last(),
            Some(&RoundEvent::Finished(summary))
        );
    }

    #[test]
    fn test_start_shows_first_phrase_and_listens() {
        let mut h = Harness::new(&["cat"], Difficulty::Medium);
        h.controller.start().unwrap();

        assert_eq!(
            h.events()[0],
            RoundEvent::WordShown {
                index: 0,
                total: 1,
                target: "cat".to_string(),
                time_limit_secs: 10,
            }
        );
        assert_eq!(h.calls.lock().unwrap().starts, 1);
        assert_eq!(h.timer.pending_count(TimerPurpose::CountdownTick), 1);
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut h = Harness::started(&["cat"], Difficulty::Medium);
        assert_eq!(h.controller.start(), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn test_start_failure_stops_session() {
        let mut controller = RoundController::new(
            PhraseList::new(&["cat"]).unwrap(),
            Difficulty::Easy.profile(),
            Box::new(FailingRecognizer),
            Box::new(ManualTimer::new()),
            Box::new(NullRoundObserver),
        );

        let result = controller.start();

        assert!(matches!(result, Err(GameError::Recognizer(_))));
        assert_eq!(controller.phase(), ControllerPhase::Stopped);
    }

    // ─── Single flight ───

    #[test]
    fn test_second_match_after_correct_does_not_score() {
        let mut h = Harness::started(&["cat", "dog"], Difficulty::Easy);

        h.say(0, "cat");
        h.say(1, "cat");

        assert_eq!(h.controller.board().score(), 1);
        assert_eq!(h.count(|e| matches!(e, RoundEvent::Correct { .. })), 1);
        assert_eq!(h.timer.pending_count(TimerPurpose::AdvanceRound), 1);
    }

    #[test]
    fn test_transcript_after_timeout_is_ignored() {
        let mut h = Harness::started(&["cat", "dog"], Difficulty::Hard);

        h.advance(5000);
        assert_eq!(h.controller.round().unwrap().outcome(), RoundOutcome::TimedOut);

        h.say(0, "cat");

        assert_eq!(h.controller.board().score(), 0);
        assert_eq!(h.controller.round().unwrap().outcome(), RoundOutcome::TimedOut);
    }

    #[test]
    fn test_skip_after_correct_is_ignored() {
        let mut h = Harness::started(&["cat", "dog"], Difficulty::Easy);

        h.say(0, "cat");
        h.controller.handle(GameEvent::Skip).unwrap();

        assert_eq!(h.controller.board().skipped(), 0);
        assert_eq!(h.count(|e| matches!(e, RoundEvent::Skipped { .. })), 0);
    }

    // ─── Windowing ───

    #[test]
    fn test_previous_round_speech_does_not_leak() {
        let mut h = Harness::started(&["cat", "cat"], Difficulty::Easy);

        h.say(0, "cat");
        h.advance(1200);
        assert_eq!(h.controller.round().unwrap().index(), 1);

        // A late refinement of the first round's result.
        h.say(0, "cat");
        assert_eq!(h.controller.board().score(), 1);
        assert!(h.controller.round().unwrap().is_pending());

        h.say(1, "cat");
        assert_eq!(h.controller.board().score(), 2);
    }

    #[test]
    fn test_sentence_accumulates_across_results() {
        let mut h = Harness::started(&["the dog is big"], Difficulty::Easy);

        h.say(0, "the dog");
        assert!(h.controller.round().unwrap().is_pending());
        assert_eq!(h.controller.round().unwrap().matched_word_count(), 2);
        assert!(h
            .events()
            .contains(&RoundEvent::Progress { matched: 2, total: 4 }));

        h.say(1, "is big");
        assert_eq!(h.controller.round().unwrap().outcome(), RoundOutcome::Correct);
    }

    #[test]
    fn test_sentence_survives_recognizer_restart() {
        let mut h = Harness::started(&["the dog is big"], Difficulty::Easy);

        h.say(0, "the dog");
        h.recognition(RecognitionEvent::Ended).unwrap();
        h.advance(100);
        h.recognition(RecognitionEvent::Started).unwrap();
        h.say(0, "is big");

        assert_eq!(h.controller.round().unwrap().outcome(), RoundOutcome::Correct);
    }

    // ─── Countdown ───

    #[test]
    fn test_tick_warning_covers_last_three_seconds() {
        let mut h = Harness::started(&["cat", "dog"], Difficulty::Hard);

        h.advance(5000);

        let ticks: Vec<(u32, bool)> = h
            .events()
            .iter()
            .filter_map(|e| match e {
                RoundEvent::Tick {
                    remaining_secs,
                    warning,
                } => Some((*remaining_secs, *warning)),
                _ => None,
            })
            .collect();
        assert_eq!(
            ticks,
            vec![(4, false), (3, true), (2, true), (1, true), (0, false)]
        );
    }

    #[test]
    fn test_correct_stops_countdown() {
        let mut h = Harness::started(&["cat", "dog"], Difficulty::Easy);

        h.say(0, "cat");

        assert_eq!(h.timer.pending_count(TimerPurpose::CountdownTick), 0);
    }

    // ─── Skip and stop ───

    #[test]
    fn test_skip_records_miss_and_advances() {
        let mut h = Harness::started(&["cat", "dog"], Difficulty::Easy);

        h.controller.handle(GameEvent::Skip).unwrap();
        assert_eq!(h.controller.board().missed_words(), ["cat"]);
        assert_eq!(h.controller.board().skipped(), 1);

        h.advance(799);
        assert_eq!(h.controller.round().unwrap().index(), 0);
        h.advance(1);
        assert_eq!(h.controller.round().unwrap().index(), 1);
    }

    #[test]
    fn test_two_misses_in_a_row_flag_struggling() {
        let mut h = Harness::started(&["cat", "dog", "sun"], Difficulty::Easy);

        h.controller.skip();
        h.advance(800);
        h.controller.skip();

        assert!(h.events().contains(&RoundEvent::Skipped {
            target: "dog".to_string(),
            struggling: true,
        }));
    }

    #[test]
    fn test_stop_mid_round_ignores_later_events() {
        let mut h = Harness::started(&["cat", "dog"], Difficulty::Easy);

        h.controller.handle(GameEvent::Stop).unwrap();
        assert_eq!(h.controller.phase(), ControllerPhase::Stopped);
        assert!(h.timer.pending().is_empty());
        assert_eq!(h.calls.lock().unwrap().aborts, 1);

        h.say(0, "cat");
        h.recognition(RecognitionEvent::Ended).unwrap();
        h.advance(5000);

        assert_eq!(h.controller.board().score(), 0);
        assert_eq!(h.calls.lock().unwrap().starts, 1);
        assert!(h.controller.is_over());
    }

    // ─── Recognizer lifecycle ───

    #[test]
    fn test_stream_end_restarts_after_debounce() {
        let mut h = Harness::started(&["cat"], Difficulty::Easy);

        h.recognition(RecognitionEvent::Ended).unwrap();
        h.recognition(RecognitionEvent::Ended).unwrap();
        assert_eq!(h.timer.pending_count(TimerPurpose::RecognizerRestart), 1);

        h.advance(100);
        assert_eq!(h.calls.lock().unwrap().starts, 2);
    }

    #[test]
    fn test_custom_delays_apply() {
        let delays = RoundDelays {
            after_correct: Duration::from_millis(10),
            ..RoundDelays::default()
        };
        let mut h = Harness::with_delays(&["cat", "dog"], Difficulty::Easy, delays);
        h.controller.start().unwrap();
        h.recognition(RecognitionEvent::Started).unwrap();

        h.say(0, "cat");
        h.advance(10);

        assert_eq!(h.controller.round().unwrap().index(), 1);
    }

    #[test]
    fn test_permission_denied_reports_blocked_mic() {
        let mut h = Harness::started(&["cat"], Difficulty::Easy);

        let result = h.recognition(RecognitionEvent::Error(RecognitionErrorCode::NotAllowed));

        assert_eq!(result, Err(GameError::PermissionDenied));
        assert_eq!(
            h.events().last(),
            Some(&RoundEvent::Microphone(MicStatus::Blocked))
        );

        h.recognition(RecognitionEvent::Ended).unwrap();
        assert_eq!(h.timer.pending_count(TimerPurpose::RecognizerRestart), 0);

        h.controller.resume_listening().unwrap();
        assert_eq!(h.calls.lock().unwrap().starts, 2);
    }

    #[test]
    fn test_resume_listening_event_restores_restarts() {
        let mut h = Harness::started(&["cat"], Difficulty::Easy);
        let denied = h.recognition(RecognitionEvent::Error(RecognitionErrorCode::NotAllowed));
        assert_eq!(denied, Err(GameError::PermissionDenied));
        h.recognition(RecognitionEvent::Ended).unwrap();

        h.controller.handle(GameEvent::ResumeListening).unwrap();
        h.recognition(RecognitionEvent::Started).unwrap();
        h.say(0, "cat");

        assert_eq!(h.calls.lock().unwrap().starts, 2);
        assert_eq!(h.controller.board().score(), 1);
    }

    #[test]
    fn test_round_still_times_out_while_microphone_blocked() {
        let mut h = Harness::started(&["cat", "dog"], Difficulty::Hard);
        let denied = h.recognition(RecognitionEvent::Error(RecognitionErrorCode::NotAllowed));
        assert_eq!(denied, Err(GameError::PermissionDenied));

        h.advance(5000);

        assert_eq!(h.controller.phase(), ControllerPhase::Playing);
        assert_eq!(h.controller.round().unwrap().outcome(), RoundOutcome::TimedOut);
    }

    #[test]
    fn test_resume_listening_requires_running_game() {
        let mut h = Harness::new(&["cat"], Difficulty::Easy);
        assert_eq!(h.controller.resume_listening(), Err(GameError::NotStarted));
    }

    #[test]
    fn test_transient_error_reports_still_listening() {
        let mut h = Harness::started(&["cat"], Difficulty::Easy);

        h.recognition(RecognitionEvent::Error(RecognitionErrorCode::NoSpeech))
            .unwrap();

        assert_eq!(
            h.events().last(),
            Some(&RoundEvent::Microphone(MicStatus::StillListening))
        );
    }

    // ─── Scoring ───

    #[test]
    fn test_streak_tier_reported_on_third_correct() {
        let mut h = Harness::started(&["cat", "dog", "sun"], Difficulty::Easy);

        for (i, word) in ["cat", "dog", "sun"].iter().enumerate() {
            h.say(i, word);
            h.advance(1200);
        }

        assert!(h.events().contains(&RoundEvent::Correct {
            target: "sun".to_string(),
            score: 3,
            streak: 3,
            streak_tier: Some(3),
            milestone: None,
        }));
        assert_eq!(h.controller.summary().accuracy_percent, 100);
    }

    #[test]
    fn test_finish_turns_microphone_off() {
        let mut h = Harness::started(&["cat"], Difficulty::Easy);

        h.say(0, "cat");
        h.advance(1200);

        let events = h.events();
        let n = events.len();
        assert_eq!(events[n - 2], RoundEvent::Microphone(MicStatus::Off));
        assert!(matches!(events[n - 1], RoundEvent::Finished(_)));
        assert_eq!(h.controller.session_state(), SessionState::Idle);
    }
}
