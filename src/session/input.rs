use std::time::Instant;

use crate::engine::scoring;
use crate::generator::TextSource;
use crate::session::mode::SessionMode;
use crate::session::state::{Session, Status};

/// What an input event did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The session already finished; nothing changed.
    Ignored,
    /// Longer than the reference; the previous input stands.
    Rejected,
    Accepted,
    /// Untimed session typed out in full.
    Completed,
    /// Timed session: passage cleared, points awarded, next passage loaded.
    Cleared { points: u32 },
    /// The clock had already run out when the input arrived.
    TimedOut,
}

impl Session {
    /// Replace the typed text with `value`, the full contents of the input
    /// field after the edit.
    pub fn on_input<T>(&mut self, value: &str, now: Instant, texts: &mut T) -> InputOutcome
    where
        T: TextSource + ?Sized,
    {
        if self.status.is_finished() {
            return InputOutcome::Ignored;
        }

        let typed: Vec<char> = value.chars().collect();

        if self.status == Status::NotStarted && !typed.is_empty() {
            self.status = Status::InProgress;
            self.started_at = Some(now);
        }

        if self.advance_clock(now) {
            return InputOutcome::TimedOut;
        }

        if typed.len() > self.reference.len() {
            return InputOutcome::Rejected;
        }
        self.input = typed;

        if self.status != Status::InProgress || self.input != self.reference {
            return InputOutcome::Accepted;
        }

        match self.mode {
            SessionMode::Untimed => {
                self.finish(Status::Completed);
                InputOutcome::Completed
            }
            SessionMode::Timed { multiplier, .. } => {
                let points = scoring::passage_points(self.input.len(), multiplier);
                self.score += points;
                self.passages_cleared += 1;
                self.reference = texts.next_text().chars().collect();
                self.input.clear();
                InputOutcome::Cleared { points }
            }
        }
    }

    /// Periodic clock update. Returns true when this tick ran out the clock.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.advance_clock(now)
    }

    /// Recompute elapsed time; time out a timed session whose limit passed.
    fn advance_clock(&mut self, now: Instant) -> bool {
        if self.status != Status::InProgress {
            return false;
        }
        let Some(started_at) = self.started_at else {
            return false;
        };

        self.elapsed = now.saturating_duration_since(started_at);

        match self.mode.time_limit() {
            Some(limit) if self.elapsed >= limit => {
                self.elapsed = limit;
                self.finish(Status::TimedOut);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::generator::RepeatText;

    fn untimed(reference: &str) -> Session {
        Session::new(reference, SessionMode::Untimed)
    }

    fn timed(reference: &str, secs: u64, multiplier: u32) -> Session {
        Session::new(
            reference,
            SessionMode::Timed {
                limit: Duration::from_secs(secs),
                multiplier,
            },
        )
    }

    #[test]
    fn test_first_char_starts_session() {
        let mut session = untimed("cat");
        let mut texts = RepeatText::new("cat");
        let t0 = Instant::now();
        assert_eq!(session.on_input("c", t0, &mut texts), InputOutcome::Accepted);
        assert_eq!(session.status(), Status::InProgress);
        assert_eq!(session.started_at(), Some(t0));
    }

    #[test]
    fn test_empty_input_does_not_start() {
        let mut session = untimed("cat");
        let mut texts = RepeatText::new("cat");
        assert_eq!(
            session.on_input("", Instant::now(), &mut texts),
            InputOutcome::Accepted
        );
        assert_eq!(session.status(), Status::NotStarted);
        assert!(!session.has_started());
    }

    #[test]
    fn test_started_at_set_once() {
        let mut session = untimed("cats");
        let mut texts = RepeatText::new("cats");
        let t0 = Instant::now();
        session.on_input("c", t0, &mut texts);
        session.on_input("", t0 + Duration::from_secs(1), &mut texts);
        session.on_input("c", t0 + Duration::from_secs(2), &mut texts);
        assert_eq!(session.started_at(), Some(t0));
        assert_eq!(session.status(), Status::InProgress);
    }

    #[test]
    fn test_overtype_rejected() {
        let mut session = untimed("cat");
        let mut texts = RepeatText::new("cat");
        let t0 = Instant::now();
        session.on_input("ca", t0, &mut texts);
        assert_eq!(session.on_input("cats", t0, &mut texts), InputOutcome::Rejected);
        assert_eq!(session.input_string(), "ca");
    }

    #[test]
    fn test_overtype_first_event_starts_but_stores_nothing() {
        let mut session = untimed("cat");
        let mut texts = RepeatText::new("cat");
        let t0 = Instant::now();
        assert_eq!(session.on_input("abcd", t0, &mut texts), InputOutcome::Rejected);
        assert!(session.input().is_empty());
        assert_eq!(session.status(), Status::InProgress);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut session = untimed("café");
        let mut texts = RepeatText::new("café");
        let t0 = Instant::now();
        assert_eq!(session.on_input("café", t0, &mut texts), InputOutcome::Completed);
    }

    #[test]
    fn test_completion_freezes_elapsed() {
        let mut session = untimed("hi");
        let mut texts = RepeatText::new("hi");
        let t0 = Instant::now();
        session.on_input("h", t0, &mut texts);
        let outcome = session.on_input("hi", t0 + Duration::from_secs(4), &mut texts);
        assert_eq!(outcome, InputOutcome::Completed);
        assert_eq!(session.elapsed(), Duration::from_secs(4));

        assert!(!session.on_tick(t0 + Duration::from_secs(60)));
        assert_eq!(session.elapsed(), Duration::from_secs(4));
    }

    #[test]
    fn test_finished_session_ignores_input() {
        let mut session = untimed("hi");
        let mut texts = RepeatText::new("hi");
        let t0 = Instant::now();
        session.on_input("hi", t0, &mut texts);
        assert_eq!(session.on_input("h", t0, &mut texts), InputOutcome::Ignored);
        assert_eq!(session.input_string(), "hi");
        assert_eq!(session.status(), Status::Completed);
    }

    #[test]
    fn test_wrong_text_of_full_length_does_not_complete() {
        let mut session = untimed("cat");
        let mut texts = RepeatText::new("cat");
        let outcome = session.on_input("cbt", Instant::now(), &mut texts);
        assert_eq!(outcome, InputOutcome::Accepted);
        assert_eq!(session.status(), Status::InProgress);
    }

    #[test]
    fn test_terminal_snapshot_keeps_wpm() {
        let mut session = untimed("a b c d");
        let mut texts = RepeatText::new("a b c d");
        let t0 = Instant::now();
        session.on_input("a", t0, &mut texts);
        session.on_input("a b c d", t0 + Duration::from_secs(3), &mut texts);

        assert_eq!(session.snapshot().wpm, 0);
        let terminal = session.terminal_snapshot().unwrap();
        assert_eq!(terminal.wpm, 40);
        assert_eq!(terminal.accuracy, 100);
        assert!(!terminal.is_active);
    }

    #[test]
    fn test_tick_updates_elapsed_untimed() {
        let mut session = untimed("hello");
        let mut texts = RepeatText::new("hello");
        let t0 = Instant::now();
        session.on_input("h", t0, &mut texts);
        assert!(!session.on_tick(t0 + Duration::from_millis(2500)));
        assert_eq!(session.elapsed(), Duration::from_millis(2500));
        assert_eq!(session.snapshot().elapsed_secs, 2);
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut session = timed("hello", 30, 3);
        assert!(!session.on_tick(Instant::now() + Duration::from_secs(100)));
        assert_eq!(session.status(), Status::NotStarted);
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_timeout_freezes_at_limit() {
        let mut session = timed("hello", 30, 3);
        let mut texts = RepeatText::new("hello");
        let t0 = Instant::now();
        session.on_input("h", t0, &mut texts);
        assert!(!session.on_tick(t0 + Duration::from_secs(29)));
        assert_eq!(session.status(), Status::InProgress);

        assert!(session.on_tick(t0 + Duration::from_secs(31)));
        assert_eq!(session.status(), Status::TimedOut);
        assert_eq!(session.elapsed(), Duration::from_secs(30));
        assert_eq!(session.time_remaining(), Some(Duration::ZERO));

        // Only the first tick past the limit reports the transition.
        assert!(!session.on_tick(t0 + Duration::from_secs(40)));
        assert_eq!(session.elapsed(), Duration::from_secs(30));
    }

    #[test]
    fn test_late_input_times_out_instead_of_scoring() {
        let mut session = timed("hi", 30, 3);
        let mut texts = RepeatText::new("hi");
        let t0 = Instant::now();
        session.on_input("h", t0, &mut texts);
        let outcome = session.on_input("hi", t0 + Duration::from_secs(30), &mut texts);
        assert_eq!(outcome, InputOutcome::TimedOut);
        assert_eq!(session.score(), 0);
        assert_eq!(session.input_string(), "h");
    }

    #[test]
    fn test_challenge_clear_scores_and_loads_next() {
        let mut session = timed("abcdefghij", 30, 3);
        let mut texts = RepeatText::new("next one");
        let t0 = Instant::now();
        session.on_input("a", t0, &mut texts);
        let outcome = session.on_input("abcdefghij", t0 + Duration::from_secs(5), &mut texts);

        assert_eq!(outcome, InputOutcome::Cleared { points: 6 });
        assert_eq!(session.score(), 6);
        assert_eq!(session.passages_cleared(), 1);
        assert_eq!(session.status(), Status::InProgress);
        assert!(session.input().is_empty());
        assert_eq!(session.reference().iter().collect::<String>(), "next one");
        assert_eq!(session.snapshot().score, 6);
    }

    #[test]
    fn test_challenge_score_accumulates() {
        let mut session = timed("hello", 60, 2);
        let mut texts = RepeatText::new("hello");
        let t0 = Instant::now();
        for i in 0..3 {
            let outcome = session.on_input("hello", t0 + Duration::from_secs(i), &mut texts);
            assert_eq!(outcome, InputOutcome::Cleared { points: 2 });
        }
        assert_eq!(session.score(), 6);
        assert_eq!(session.passages_cleared(), 3);

        session.on_tick(t0 + Duration::from_secs(61));
        assert_eq!(session.status(), Status::TimedOut);
        assert_eq!(session.terminal_snapshot().unwrap().score, 6);
    }
}
