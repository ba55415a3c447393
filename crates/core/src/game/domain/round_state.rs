use super::phrase::TargetPhrase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Pending,
    Correct,
    TimedOut,
    Skipped,
}

/// State of the round currently on screen.
///
/// The outcome leaves `Pending` exactly once and never changes afterwards.
#[derive(Debug, Clone)]
pub struct RoundState {
    index: usize,
    target: TargetPhrase,
    time_remaining: u32,
    matched_word_count: usize,
    outcome: RoundOutcome,
}

impl RoundState {
    pub fn new(index: usize, target: TargetPhrase, time_limit_secs: u32) -> Self {
        Self {
            index,
            target,
            time_remaining: time_limit_secs,
            matched_word_count: 0,
            outcome: RoundOutcome::Pending,
        }
    }

    /// Latches a terminal outcome. Returns `false` (and changes nothing) if
    /// the round was already resolved or `outcome` is `Pending`.
    pub fn resolve(&mut self, outcome: RoundOutcome) -> bool {
        if self.outcome != RoundOutcome::Pending || outcome == RoundOutcome::Pending {
            return false;
        }
        self.outcome = outcome;
        true
    }

    /// Counts down one second and returns the seconds left.
    pub fn tick(&mut self) -> u32 {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.time_remaining
    }

    pub fn set_matched_word_count(&mut self, count: usize) {
        self.matched_word_count = count;
    }

    pub fn is_pending(&self) -> bool {
        self.outcome == RoundOutcome::Pending
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn target(&self) -> &TargetPhrase {
        &self.target
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn matched_word_count(&self) -> usize {
        self.matched_word_count
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }
}
