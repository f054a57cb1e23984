use serde::Serialize;

use crate::session::metrics::MetricsSnapshot;
use crate::session::mode::GameMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PracticeBest {
    pub wpm: u32,
    pub accuracy: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChallengeBest {
    pub score: u32,
}

/// High-water marks for the lifetime of the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BestRecords {
    pub practice: PracticeBest,
    pub challenge: ChallengeBest,
}

/// Which records the last update raised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Improvement {
    pub wpm: bool,
    pub accuracy: bool,
    pub score: bool,
}

impl Improvement {
    pub fn any(&self) -> bool {
        self.wpm || self.accuracy || self.score
    }
}

impl BestRecords {
    /// Fold a terminal snapshot into the records for `mode`. Each field is
    /// replaced only by a strictly greater value, independently of the others.
    pub fn update(&mut self, mode: GameMode, terminal: &MetricsSnapshot) -> Improvement {
        let mut improvement = Improvement::default();
        match mode {
            GameMode::Practice => {
                if terminal.wpm > self.practice.wpm {
                    self.practice.wpm = terminal.wpm;
                    improvement.wpm = true;
                }
                if terminal.accuracy > self.practice.accuracy {
                    self.practice.accuracy = terminal.accuracy;
                    improvement.accuracy = true;
                }
            }
            GameMode::Challenge => {
                if terminal.score > self.challenge.score {
                    self.challenge.score = terminal.score;
                    improvement.score = true;
                }
            }
        }
        improvement
    }
}
