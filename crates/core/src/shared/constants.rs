/// Pause after a correct answer before the next word appears.
pub const CORRECT_ADVANCE_DELAY_MS: u64 = 1200;
/// Pause after the countdown runs out.
pub const TIMEOUT_ADVANCE_DELAY_MS: u64 = 1500;
pub const SKIP_ADVANCE_DELAY_MS: u64 = 800;

/// Debounce between a recognition stream ending and the automatic restart.
pub const RESTART_DEBOUNCE_MS: u64 = 100;

pub const COUNTDOWN_TICK_MS: u64 = 1000;
/// Ticks at or below this many remaining seconds are flagged as warnings.
pub const TICK_WARNING_SECS: u32 = 3;

pub const STREAK_TIERS: &[u32] = &[3, 5, 10];
pub const SCORE_MILESTONES: &[u32] = &[5, 10, 15, 20];

/// Consecutive misses after which the learner is considered struggling.
pub const STRUGGLING_MISSES: u32 = 2;

/// Results after which the terminal recognizer ends its stream by itself.
pub const DEFAULT_RESULTS_PER_STREAM: usize = 5;
