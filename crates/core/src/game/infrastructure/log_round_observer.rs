use crate::game::domain::round_event::RoundEvent;
use crate::game::domain::round_observer::RoundObserver;
use crate::recognition::domain::recognition_session::MicStatus;

/// Observer that forwards round transitions to the `log` crate and keeps a
/// tally for an end-of-session report.
///
/// Countdown ticks are logged at trace level only, since one arrives every
/// second.
#[derive(Debug, Default)]
pub struct LogRoundObserver {
    rounds_shown: usize,
    heard: usize,
    correct: usize,
    missed: usize,
    mic_interruptions: usize,
}

impl LogRoundObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tally as one line, or `None` if no round was shown.
    pub fn summary_string(&self) -> Option<String> {
        if self.rounds_shown == 0 {
            return None;
        }
        Some(format!(
            "{} rounds shown, {} transcripts heard, {} correct, {} missed, {} microphone interruptions",
            self.rounds_shown, self.heard, self.correct, self.missed, self.mic_interruptions
        ))
    }
}

impl RoundObserver for LogRoundObserver {
    fn on_event(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::WordShown {
                index,
                total,
                target,
                time_limit_secs,
            } => {
                self.rounds_shown += 1;
                log::info!(
                    "Round {}/{total}: {target:?} ({time_limit_secs}s)",
                    index + 1
                );
            }
            RoundEvent::Tick {
                remaining_secs,
                warning,
            } => {
                log::trace!("{remaining_secs}s left (warning: {warning})");
            }
            RoundEvent::Heard { transcript } => {
                self.heard += 1;
                log::debug!("Heard {transcript:?}");
            }
            RoundEvent::Progress { matched, total } => {
                log::debug!("Sentence progress {matched}/{total}");
            }
            RoundEvent::Correct {
                target,
                streak_tier,
                milestone,
                ..
            } => {
                self.correct += 1;
                if let Some(tier) = streak_tier {
                    log::info!("Streak of {tier} reached on {target:?}");
                }
                if let Some(score) = milestone {
                    log::info!("Score milestone {score}");
                }
            }
            RoundEvent::TimedOut { target, struggling }
            | RoundEvent::Skipped { target, struggling } => {
                self.missed += 1;
                if *struggling {
                    log::warn!("Several misses in a row, latest {target:?}");
                }
            }
            RoundEvent::Microphone(status) => match status {
                MicStatus::Blocked => {
                    self.mic_interruptions += 1;
                    log::error!("Microphone blocked; allow access and resume listening");
                }
                MicStatus::StillListening => {
                    self.mic_interruptions += 1;
                    log::warn!("Recognizer hiccup; still listening");
                }
                MicStatus::Listening | MicStatus::Off => log::debug!("Microphone {status:?}"),
            },
            RoundEvent::Finished(summary) => {
                log::info!(
                    "Finished: {}/{} ({}%), {}",
                    summary.score,
                    summary.total,
                    summary.accuracy_percent,
                    summary.rating.message()
                );
            }
        }
    }
}
