use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Challenge difficulty: shorter clock, bigger multiplier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn time_limit(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_secs(90),
            Difficulty::Medium => Duration::from_secs(60),
            Difficulty::Hard => Duration::from_secs(30),
        }
    }

    pub fn multiplier(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

/// Points for clearing one passage of `chars` characters: one point per
/// five characters, scaled by the difficulty multiplier.
pub fn passage_points(chars: usize, multiplier: u32) -> u32 {
    ((chars as f64 / 5.0) * multiplier as f64).round() as u32
}
