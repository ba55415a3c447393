use std::time::Duration;

/// Opaque identifier for a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What a scheduled timer is for; echoed back when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerPurpose {
    /// One-second countdown step for the active round.
    CountdownTick,
    /// Move on to the next round after an outcome was latched.
    AdvanceRound,
    /// Debounced restart of an ended recognition stream.
    RecognizerRestart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub handle: TimerHandle,
    pub purpose: TimerPurpose,
}

/// Domain interface for one-shot timers.
///
/// Firing is reported back to the game as an event carrying the handle, so
/// consumers must tolerate a firing for a handle they already cancelled.
pub trait Timer: Send {
    fn schedule(&mut self, delay: Duration, purpose: TimerPurpose) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}
