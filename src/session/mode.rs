use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::engine::scoring::Difficulty;

/// What the user picked from the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Practice,
    Challenge,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Practice => "Practice",
            GameMode::Challenge => "Challenge",
        }
    }
}

/// How a session keeps time and scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    /// Ends when the input equals the reference.
    Untimed,
    /// Runs until the clock expires; each cleared passage scores points.
    Timed { limit: Duration, multiplier: u32 },
}

impl SessionMode {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        match mode {
            GameMode::Practice => SessionMode::Untimed,
            GameMode::Challenge => SessionMode::Timed {
                limit: difficulty.time_limit(),
                multiplier: difficulty.multiplier(),
            },
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        match self {
            SessionMode::Untimed => None,
            SessionMode::Timed { limit, .. } => Some(*limit),
        }
    }
}
