use super::round_event::RoundEvent;

/// Receives round transitions as they happen.
///
/// Keeps the round controller independent of how (or whether) anything is
/// rendered.
pub trait RoundObserver: Send {
    fn on_event(&mut self, event: &RoundEvent);
}

/// Observer that discards every event.
pub struct NullRoundObserver;

impl RoundObserver for NullRoundObserver {
    fn on_event(&mut self, _event: &RoundEvent) {}
}
