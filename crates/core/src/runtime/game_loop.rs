use crossbeam_channel::Receiver;

use super::game_event::GameEvent;
use crate::game::domain::game_error::GameError;
use crate::game::domain::round_controller::RoundController;
use crate::game::domain::session_summary::SessionSummary;

/// Single-threaded driver for a [`RoundController`].
///
/// Recognizer callbacks, timer firings and user commands are produced on
/// other threads but all arrive through one channel, so the controller
/// only ever sees one event at a time.
pub struct GameLoop {
    controller: RoundController,
    events: Receiver<GameEvent>,
}

impl GameLoop {
    pub fn new(controller: RoundController, events: Receiver<GameEvent>) -> Self {
        Self { controller, events }
    }

    /// Plays the session to completion and returns its summary.
    ///
    /// Returns early with an error if the recognizer cannot be started.
    /// A denied microphone does not end the session: rounds keep timing out
    /// until a [`GameEvent::ResumeListening`] arrives. If every producer
    /// disconnects, the session is stopped and the partial summary returned.
    pub fn run(mut self) -> Result<SessionSummary, GameError> {
        self.controller.start()?;

        while !self.controller.is_over() {
            let Ok(event) = self.events.recv() else {
                log::warn!("Event channel closed; stopping session");
                self.controller.stop();
                break;
            };
            match self.controller.handle(event) {
                Ok(()) => {}
                Err(GameError::PermissionDenied) => {
                    log::warn!("Microphone access denied; waiting for resume");
                }
                Err(e) => {
                    self.controller.stop();
                    return Err(e);
                }
            }
        }

        Ok(self.controller.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::domain::difficulty::Difficulty;
    use crate::game::domain::phrase::PhraseList;
    use crate::game::domain::round_controller::RoundDelays;
    use crate::game::domain::round_observer::NullRoundObserver;
    use crate::recognition::domain::recognition_event::RecognitionErrorCode;
    use crate::recognition::infrastructure::channel_recognizer::{
        ChannelRecognizer, TranscriptFeeder,
    };
    use crate::scheduling::infrastructure::thread_timer::ThreadTimer;
    use crossbeam_channel::Sender;
    use std::thread;
    use std::time::Duration;

    fn fast_delays() -> RoundDelays {
        RoundDelays {
            after_correct: Duration::from_millis(5),
            after_timeout: Duration::from_millis(5),
            after_skip: Duration::from_millis(5),
            restart_debounce: Duration::from_millis(5),
            tick: Duration::from_millis(10),
        }
    }

    fn new_game(
        phrases: &[&str],
        difficulty: Difficulty,
    ) -> (GameLoop, TranscriptFeeder, Sender<GameEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let recognizer = ChannelRecognizer::new(tx.clone(), 0);
        let feeder = recognizer.feeder();
        let controller = RoundController::new(
            PhraseList::new(phrases).unwrap(),
            difficulty.profile(),
            Box::new(recognizer),
            Box::new(ThreadTimer::new(tx.clone())),
            Box::new(NullRoundObserver),
        )
        .with_delays(fast_delays());
        (GameLoop::new(controller, rx), feeder, tx)
    }

    /// Keeps pushing until a stream is running to accept the text.
    fn say_when_listening(
        feeder: TranscriptFeeder,
        text: &'static str,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            while !feeder.push(text) {
                thread::sleep(Duration::from_millis(2));
            }
        })
    }

    #[test]
    fn test_run_plays_to_summary() {
        let (game, feeder, _tx) = new_game(&["cat"], Difficulty::Easy);
        let speaker = say_when_listening(feeder, "cat");

        let summary = game.run().unwrap();
        speaker.join().unwrap();

        assert_eq!(summary.score, 1);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_run_times_out_unanswered_rounds() {
        let (game, _feeder, _tx) = new_game(&["cat", "dog"], Difficulty::Hard);

        let summary = game.run().unwrap();

        assert_eq!(summary.score, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.missed_words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_stop_event_ends_run_early() {
        let (game, _feeder, tx) = new_game(&["cat", "dog"], Difficulty::Easy);
        tx.send(GameEvent::Skip).unwrap();
        tx.send(GameEvent::Stop).unwrap();

        let summary = game.run().unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.missed_words, vec!["cat"]);
    }

    #[test]
    fn test_permission_denied_keeps_session_running() {
        let (game, feeder, _tx) = new_game(&["cat"], Difficulty::Hard);
        feeder.fail(RecognitionErrorCode::NotAllowed);

        let summary = game.run().unwrap();

        assert_eq!(summary.score, 0);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_resume_after_permission_denied_hears_answers() {
        let (game, feeder, tx) = new_game(&["cat"], Difficulty::Easy);
        feeder.fail(RecognitionErrorCode::NotAllowed);
        tx.send(GameEvent::ResumeListening).unwrap();
        let speaker = say_when_listening(feeder, "cat");

        let summary = game.run().unwrap();
        speaker.join().unwrap();

        assert_eq!(summary.score, 1);
    }
}
