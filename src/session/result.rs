use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::scoring::Difficulty;
use crate::session::mode::GameMode;
use crate::session::state::{Session, Status};

/// Record of a finished session, kept for the lifetime of the process.
#[derive(Clone, Debug, Serialize)]
pub struct SessionResult {
    pub mode: GameMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub status: Status,
    pub wpm: u32,
    pub accuracy: u32,
    pub correct: usize,
    pub typed: usize,
    pub elapsed_secs: u64,
    pub score: u32,
    pub passages_cleared: u32,
    pub achievements: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl SessionResult {
    /// `None` until the session has finished.
    pub fn from_session(session: &Session, mode: GameMode, difficulty: Difficulty) -> Option<Self> {
        let terminal = session.terminal_snapshot()?;
        let achievements = crate::engine::achievements::evaluate(&terminal)
            .into_iter()
            .map(str::to_string)
            .collect();

        Some(Self {
            mode,
            difficulty: (mode == GameMode::Challenge).then_some(difficulty),
            status: session.status(),
            wpm: terminal.wpm,
            accuracy: terminal.accuracy,
            correct: terminal.correct,
            typed: terminal.typed,
            elapsed_secs: terminal.elapsed_secs,
            score: terminal.score,
            passages_cleared: session.passages_cleared(),
            achievements,
            timestamp: Utc::now(),
        })
    }
}
