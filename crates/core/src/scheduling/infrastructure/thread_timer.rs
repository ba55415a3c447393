use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::runtime::game_event::GameEvent;
use crate::scheduling::domain::timer::{Timer, TimerFired, TimerHandle, TimerPurpose};

enum TimerCommand {
    Schedule {
        deadline: Instant,
        handle: TimerHandle,
        purpose: TimerPurpose,
    },
    Cancel(TimerHandle),
}

/// Wall-clock timer backed by a single worker thread.
///
/// Fired timers are posted to the game's event channel as
/// [`GameEvent::Timer`]; the worker never touches game state. The worker
/// exits when this value is dropped or the event channel disconnects.
pub struct ThreadTimer {
    commands: Sender<TimerCommand>,
    next_id: u64,
}

impl ThreadTimer {
    pub fn new(events: Sender<GameEvent>) -> Self {
        let (commands, command_rx) = crossbeam_channel::unbounded();
        thread::spawn(move || run_worker(command_rx, events));
        Self {
            commands,
            next_id: 0,
        }
    }
}

impl Timer for ThreadTimer {
    fn schedule(&mut self, delay: Duration, purpose: TimerPurpose) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let command = TimerCommand::Schedule {
            deadline: Instant::now() + delay,
            handle,
            purpose,
        };
        if self.commands.send(command).is_err() {
            log::warn!("Timer worker has stopped; {purpose:?} timer will not fire");
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let _ = self.commands.send(TimerCommand::Cancel(handle));
    }
}

/// Pending deadlines plus the handles cancelled before they came due.
#[derive(Default)]
struct TimerQueue {
    heap: BinaryHeap<Reverse<(Instant, TimerHandle, TimerPurpose)>>,
    cancelled: HashSet<TimerHandle>,
}

impl TimerQueue {
    fn push(&mut self, deadline: Instant, handle: TimerHandle, purpose: TimerPurpose) {
        self.heap.push(Reverse((deadline, handle, purpose)));
    }

    /// Handles no longer queued have already fired and are ignored.
    fn cancel(&mut self, handle: TimerHandle) {
        if self.heap.iter().any(|Reverse((_, queued, _))| *queued == handle) {
            self.cancelled.insert(handle);
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse((deadline, _, _))| *deadline)
    }

    /// Removes and returns the earliest live timer due at or before `now`.
    fn pop_due(&mut self, now: Instant) -> Option<TimerFired> {
        while let Some(Reverse((deadline, handle, purpose))) = self.heap.peek().copied() {
            if deadline > now {
                return None;
            }
            self.heap.pop();
            if !self.cancelled.remove(&handle) {
                return Some(TimerFired { handle, purpose });
            }
        }
        None
    }
}

fn run_worker(commands: Receiver<TimerCommand>, events: Sender<GameEvent>) {
    let mut queue = TimerQueue::default();

    loop {
        let received = match queue.next_deadline() {
            Some(deadline) => {
                commands.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(TimerCommand::Schedule {
                deadline,
                handle,
                purpose,
            }) => queue.push(deadline, handle, purpose),
            Ok(TimerCommand::Cancel(handle)) => queue.cancel(handle),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return,
        }

        let now = Instant::now();
        while let Some(fired) = queue.pop_due(now) {
            if events.send(GameEvent::Timer(fired)).is_err() {
                return;
            }
        }
    }
}
