use std::time::{Duration, Instant};

use serde::Serialize;

use crate::session::metrics::{self, MetricsSnapshot};
use crate::session::mode::SessionMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
    TimedOut,
}

impl Status {
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Completed | Status::TimedOut)
    }
}

/// Per-character classification used for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect(char),
    Pending,
}

/// One typing attempt against a reference text.
///
/// A session only moves forward through [`Status`]; resetting means building
/// a new one. Time never comes from an ambient clock: every transition takes
/// the current instant as an argument.
#[derive(Clone, Debug)]
pub struct Session {
    pub(super) reference: Vec<char>,
    pub(super) input: Vec<char>,
    pub(super) mode: SessionMode,
    pub(super) status: Status,
    pub(super) started_at: Option<Instant>,
    pub(super) elapsed: Duration,
    pub(super) score: u32,
    pub(super) passages_cleared: u32,
    pub(super) terminal: Option<MetricsSnapshot>,
}

impl Session {
    pub fn new(reference: &str, mode: SessionMode) -> Self {
        Self {
            reference: reference.chars().collect(),
            input: Vec::new(),
            mode,
            status: Status::NotStarted,
            started_at: None,
            elapsed: Duration::ZERO,
            score: 0,
            passages_cleared: 0,
            terminal: None,
        }
    }

    pub fn reference(&self) -> &[char] {
        &self.reference
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn input_string(&self) -> String {
        self.input.iter().collect()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn passages_cleared(&self) -> u32 {
        self.passages_cleared
    }

    /// Time left on the clock; `None` for untimed sessions.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.mode
            .time_limit()
            .map(|limit| limit.saturating_sub(self.elapsed))
    }

    /// Share of the reference typed so far, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.reference.is_empty() {
            return 0.0;
        }
        self.input.len() as f64 / self.reference.len() as f64
    }

    pub fn char_status(&self, idx: usize) -> CharStatus {
        match (self.input.get(idx), self.reference.get(idx)) {
            (Some(typed), Some(expected)) if typed == expected => CharStatus::Correct,
            (Some(typed), _) => CharStatus::Incorrect(*typed),
            (None, _) => CharStatus::Pending,
        }
    }

    /// Live metrics. WPM reads zero unless the session is running.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.measure(self.status == Status::InProgress)
    }

    /// Metrics captured at the moment the session finished, with the WPM
    /// as it stood right before the clock stopped.
    pub fn terminal_snapshot(&self) -> Option<MetricsSnapshot> {
        self.terminal
    }

    fn measure(&self, with_wpm: bool) -> MetricsSnapshot {
        let correct = metrics::correct_count(&self.reference, &self.input);
        let typed = self.input.len();
        let elapsed_secs = self.elapsed.as_secs();
        let wpm = if with_wpm {
            metrics::words_per_minute(metrics::word_count(&self.input), elapsed_secs)
        } else {
            0
        };

        MetricsSnapshot {
            correct,
            typed,
            accuracy: metrics::accuracy(correct, typed),
            wpm,
            elapsed_secs,
            score: self.score,
            is_active: self.status == Status::InProgress,
        }
    }

    pub(super) fn finish(&mut self, status: Status) {
        self.terminal = Some(self.measure(true));
        self.status = status;
        if let Some(terminal) = self.terminal.as_mut() {
            terminal.is_active = false;
        }
    }
}
