use std::collections::BTreeMap;

/// Round-local cursor over a recognizer's result sequence.
///
/// Results are keyed by their stream index. `reset_window` moves the reset
/// point past everything seen so far, so a round only ever observes results
/// produced after it began. When the recognizer restarts, its index drops
/// back to zero; the tracker treats that as a new stream generation and
/// carries the current window's text across so nothing said earlier in the
/// round is lost.
#[derive(Debug, Default)]
pub struct WindowTracker {
    /// First index belonging to the window in the current generation.
    reset_point: usize,
    /// One past the highest index seen in the current generation.
    high_water: usize,
    last_index: Option<usize>,
    generation: u64,
    fragments: BTreeMap<usize, String>,
    /// Window text from earlier generations of this round.
    carried: Vec<String>,
}

impl WindowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh window at the current position without touching the stream.
    pub fn reset_window(&mut self) {
        self.reset_point = self.high_water;
        self.fragments.clear();
        self.carried.clear();
    }

    /// Marks the start of a new underlying stream whose indices restart at zero.
    pub fn start_generation(&mut self) {
        let carried: Vec<String> = std::mem::take(&mut self.fragments)
            .into_values()
            .filter(|text| !text.is_empty())
            .collect();
        self.carried.extend(carried);
        self.reset_point = 0;
        self.high_water = 0;
        self.last_index = None;
        self.generation += 1;
        log::debug!("Window tracker: stream generation {}", self.generation);
    }

    /// Records a result and returns the window text if the result belongs
    /// to the current window and the window is not empty.
    pub fn observe(&mut self, index: usize, text: &str) -> Option<String> {
        if self.last_index.is_some_and(|last| index < last) {
            self.start_generation();
        }
        self.last_index = Some(index);
        self.high_water = self.high_water.max(index + 1);

        if index < self.reset_point {
            log::debug!(
                "Window tracker: dropping result {index} before reset point {}",
                self.reset_point
            );
            return None;
        }

        self.fragments.insert(index, text.trim().to_string());
        let window = self.window_text();
        (!window.is_empty()).then_some(window)
    }

    /// Window fragments in order, joined by single spaces.
    pub fn window_text(&self) -> String {
        self.carried
            .iter()
            .map(String::as_str)
            .chain(self.fragments.values().map(String::as_str))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Forgets everything, including partial results, keeping only the
    /// generation counter.
    pub fn clear(&mut self) {
        *self = Self {
            generation: self.generation,
            ..Self::default()
        };
    }

    pub fn reset_point(&self) -> usize {
        self.reset_point
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
