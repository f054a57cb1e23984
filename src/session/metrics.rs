use serde::Serialize;

/// Lower bound on the minutes used for WPM, so the first seconds of a
/// session do not produce absurd spikes.
pub const MIN_MINUTES: f64 = 0.1;

/// Derived statistics for one session, recomputed after every input or tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub correct: usize,
    pub typed: usize,
    pub accuracy: u32,
    pub wpm: u32,
    pub elapsed_secs: u64,
    pub score: u32,
    pub is_active: bool,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            correct: 0,
            typed: 0,
            accuracy: 100,
            wpm: 0,
            elapsed_secs: 0,
            score: 0,
            is_active: false,
        }
    }
}

impl MetricsSnapshot {
    pub fn errors(&self) -> usize {
        self.typed - self.correct
    }
}

/// Positions where the typed character equals the reference character.
pub fn correct_count(reference: &[char], input: &[char]) -> usize {
    input
        .iter()
        .zip(reference)
        .filter(|(typed, expected)| typed == expected)
        .count()
}

pub fn accuracy(correct: usize, typed: usize) -> u32 {
    if typed == 0 {
        return 100;
    }
    (100.0 * correct as f64 / typed as f64).round() as u32
}

/// Whitespace-delimited tokens. Blank input has no words.
pub fn word_count(input: &[char]) -> usize {
    input
        .iter()
        .collect::<String>()
        .split_whitespace()
        .count()
}

pub fn minutes_elapsed(elapsed_secs: u64) -> f64 {
    (elapsed_secs as f64 / 60.0).max(MIN_MINUTES)
}

pub fn words_per_minute(words: usize, elapsed_secs: u64) -> u32 {
    (words as f64 / minutes_elapsed(elapsed_secs)).round() as u32
}
