use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::scheduling::domain::timer::{Timer, TimerFired, TimerHandle, TimerPurpose};

/// Virtual-clock timer. Nothing fires until the owner advances time.
///
/// Clones share the same clock, so a test can keep one clone while the
/// game owns another.
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Arc<Mutex<ManualClock>>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled>,
}

struct Scheduled {
    deadline: Duration,
    fired: TimerFired,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Pending timers in firing order.
    pub fn pending(&self) -> Vec<TimerFired> {
        let clock = self.lock();
        let mut pending: Vec<&Scheduled> = clock.pending.iter().collect();
        pending.sort_by_key(|s| (s.deadline, s.fired.handle));
        pending.into_iter().map(|s| s.fired).collect()
    }

    pub fn pending_count(&self, purpose: TimerPurpose) -> usize {
        self.lock()
            .pending
            .iter()
            .filter(|s| s.fired.purpose == purpose)
            .count()
    }

    /// Removes and returns the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&self, until: Duration) -> Option<TimerFired> {
        let mut clock = self.lock();
        let (pos, _) = clock
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.deadline <= until)
            .min_by_key(|(_, s)| (s.deadline, s.fired.handle))?;
        let scheduled = clock.pending.remove(pos);
        clock.now = clock.now.max(scheduled.deadline);
        Some(scheduled.fired)
    }

    /// Advances the clock by `by`, handing every timer that comes due to
    /// `deliver` in deadline order. Timers scheduled by `deliver` itself
    /// fire in the same call if they fall inside the window.
    pub fn advance(&self, by: Duration, mut deliver: impl FnMut(TimerFired)) {
        let until = self.now() + by;
        while let Some(fired) = self.pop_due(until) {
            deliver(fired);
        }
        let mut clock = self.lock();
        clock.now = clock.now.max(until);
    }

    fn lock(&self) -> MutexGuard<'_, ManualClock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, delay: Duration, purpose: TimerPurpose) -> TimerHandle {
        let mut clock = self.lock();
        clock.next_id += 1;
        let handle = TimerHandle::new(clock.next_id);
        let deadline = clock.now + delay;
        clock.pending.push(Scheduled {
            deadline,
            fired: TimerFired { handle, purpose },
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.lock().pending.retain(|s| s.fired.handle != handle);
    }
}
