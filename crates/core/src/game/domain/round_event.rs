use super::session_summary::SessionSummary;
use crate::recognition::domain::recognition_session::MicStatus;

/// Round transitions reported to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    WordShown {
        index: usize,
        total: usize,
        target: String,
        time_limit_secs: u32,
    },
    /// One second of the countdown elapsed. `warning` is set for the last
    /// few seconds before a timeout.
    Tick {
        remaining_secs: u32,
        warning: bool,
    },
    Heard {
        transcript: String,
    },
    /// Sentence targets only: leading words matched so far.
    Progress {
        matched: usize,
        total: usize,
    },
    Correct {
        target: String,
        score: u32,
        streak: u32,
        streak_tier: Option<u32>,
        milestone: Option<u32>,
    },
    TimedOut {
        target: String,
        struggling: bool,
    },
    Skipped {
        target: String,
        struggling: bool,
    },
    Microphone(MicStatus),
    Finished(SessionSummary),
}
