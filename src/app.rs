use std::collections::{BTreeSet, VecDeque};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::engine::achievements;
use crate::engine::best::{BestRecords, Improvement};
use crate::engine::scoring::Difficulty;
use crate::generator::TextSource;
use crate::session::input::InputOutcome;
use crate::session::metrics::MetricsSnapshot;
use crate::session::mode::{GameMode, SessionMode};
use crate::session::result::SessionResult;
use crate::session::state::Session;
use crate::session::timer::SessionTimer;

const HISTORY_LIMIT: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Session,
    Results,
}

pub struct App {
    pub screen: AppScreen,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub session: Session,
    pub best: BestRecords,
    pub last_improvement: Improvement,
    pub last_result: Option<SessionResult>,
    pub history: VecDeque<SessionResult>,
    pub config: Config,
    pub menu_selected: usize,
    pub should_quit: bool,
    session_id: u64,
    timer: Option<SessionTimer>,
    texts: Box<dyn TextSource>,
}

impl App {
    pub fn new(config: Config, mut texts: Box<dyn TextSource>) -> Self {
        let mode = config.mode;
        let difficulty = config.difficulty;
        let session = Session::new(&texts.next_text(), SessionMode::new(mode, difficulty));
        let menu_selected = match mode {
            GameMode::Practice => 0,
            GameMode::Challenge => 1,
        };

        Self {
            screen: AppScreen::Menu,
            mode,
            difficulty,
            session,
            best: BestRecords::default(),
            last_improvement: Improvement::default(),
            last_result: None,
            history: VecDeque::new(),
            config,
            menu_selected,
            should_quit: false,
            session_id: 0,
            timer: None,
            texts,
        }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn timer(&self) -> Option<&SessionTimer> {
        self.timer.as_ref()
    }

    /// Begin a fresh session in `mode` and switch to the typing screen.
    pub fn start(&mut self, mode: GameMode, difficulty: Difficulty) {
        self.mode = mode;
        self.difficulty = difficulty;
        self.reset();
        self.screen = AppScreen::Session;
    }

    /// Throw the current session away and build a new one on a new passage.
    /// The old session's timer is cancelled first so none of its ticks can
    /// land on the replacement.
    pub fn reset(&mut self) {
        self.timer = None;
        self.session_id += 1;
        let reference = self.texts.next_text();
        self.session = Session::new(&reference, SessionMode::new(self.mode, self.difficulty));
        self.last_improvement = Improvement::default();
        if self.screen == AppScreen::Results {
            self.screen = AppScreen::Session;
        }
    }

    pub fn go_to_menu(&mut self) {
        self.reset();
        self.screen = AppScreen::Menu;
    }

    pub fn on_input(&mut self, value: &str, now: Instant) -> InputOutcome {
        let was_started = self.session.has_started();
        let outcome = self.session.on_input(value, now, self.texts.as_mut());

        if !was_started && self.session.has_started() {
            self.timer = Some(SessionTimer::arm(
                self.session_id,
                self.config.tick_interval(self.mode),
                now,
            ));
        }
        if matches!(outcome, InputOutcome::Completed | InputOutcome::TimedOut) {
            self.record_result();
        }
        outcome
    }

    pub fn type_char(&mut self, ch: char, now: Instant) -> InputOutcome {
        let mut value = self.session.input_string();
        value.push(ch);
        self.on_input(&value, now)
    }

    pub fn backspace(&mut self, now: Instant) -> InputOutcome {
        let mut value = self.session.input_string();
        value.pop();
        self.on_input(&value, now)
    }

    pub fn clear_input(&mut self, now: Instant) -> InputOutcome {
        self.on_input("", now)
    }

    /// Feed a clock tick. Only the armed timer of the current session is
    /// allowed to move the session clock.
    pub fn on_tick(&mut self, now: Instant) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        if timer.session_id() != self.session_id {
            self.timer = None;
            return;
        }
        if !timer.poll(now) {
            return;
        }
        if self.session.on_tick(now) {
            self.record_result();
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.session.snapshot()
    }

    pub fn achievements(&self) -> BTreeSet<&'static str> {
        achievements::evaluate(&self.snapshot())
    }

    /// Event loop cadence: fast enough for the current mode's timer.
    pub fn tick_rate(&self) -> Duration {
        self.config.tick_interval(self.mode)
    }

    fn record_result(&mut self) {
        self.timer = None;
        let Some(terminal) = self.session.terminal_snapshot() else {
            return;
        };
        self.last_improvement = self.best.update(self.mode, &terminal);

        if let Some(result) = SessionResult::from_session(&self.session, self.mode, self.difficulty) {
            self.history.push_back(result.clone());
            if self.history.len() > HISTORY_LIMIT {
                self.history.pop_front();
            }
            self.last_result = Some(result);
        }
        self.screen = AppScreen::Results;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RepeatText;
    use crate::session::state::Status;

    fn app_with(text: &str) -> App {
        App::new(Config::default(), Box::new(RepeatText::new(text)))
    }

    #[test]
    fn test_new_app_starts_on_menu() {
        let app = app_with("hello");
        assert_eq!(app.screen, AppScreen::Menu);
        assert_eq!(app.mode, GameMode::Practice);
        assert_eq!(app.session.status(), Status::NotStarted);
        assert!(app.timer().is_none());
    }

    #[test]
    fn test_start_switches_mode_and_screen() {
        let mut app = app_with("hello");
        app.start(GameMode::Challenge, Difficulty::Hard);
        assert_eq!(app.screen, AppScreen::Session);
        assert_eq!(
            app.session.mode().time_limit(),
            Some(Duration::from_secs(30))
        );
        assert_eq!(app.tick_rate(), Duration::from_secs(1));
    }

    #[test]
    fn test_first_keystroke_arms_timer() {
        let mut app = app_with("hello");
        app.start(GameMode::Practice, Difficulty::Medium);
        let t0 = Instant::now();
        app.type_char('h', t0);
        let mut timer = *app.timer().unwrap();
        assert_eq!(timer.session_id(), app.session_id());
        assert!(!timer.poll(t0 + Duration::from_millis(99)));
        assert!(timer.poll(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_typing_builds_field_value() {
        let mut app = app_with("hey");
        app.start(GameMode::Practice, Difficulty::Medium);
        let t0 = Instant::now();
        app.type_char('h', t0);
        app.type_char('x', t0);
        assert_eq!(app.session.input_string(), "hx");
        app.backspace(t0);
        app.type_char('e', t0);
        assert_eq!(app.session.input_string(), "he");
        app.clear_input(t0);
        assert_eq!(app.session.input_string(), "");
        assert_eq!(app.session.status(), Status::InProgress);
    }

    #[test]
    fn test_overtype_keystroke_dropped() {
        let mut app = app_with("ab");
        app.start(GameMode::Practice, Difficulty::Medium);
        let t0 = Instant::now();
        app.type_char('a', t0);
        app.type_char('x', t0);
        assert_eq!(app.type_char('y', t0), InputOutcome::Rejected);
        assert_eq!(app.session.input_string(), "ax");
    }

    #[test]
    fn test_practice_completion_records_best() {
        let mut app = app_with("go");
        app.start(GameMode::Practice, Difficulty::Medium);
        let t0 = Instant::now();
        app.type_char('g', t0);
        let outcome = app.type_char('o', t0 + Duration::from_secs(2));

        assert_eq!(outcome, InputOutcome::Completed);
        assert_eq!(app.screen, AppScreen::Results);
        assert!(app.timer().is_none());
        assert_eq!(app.best.practice.wpm, 10);
        assert_eq!(app.best.practice.accuracy, 100);
        assert!(app.last_improvement.wpm);
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.last_result.as_ref().unwrap().status, Status::Completed);
    }

    #[test]
    fn test_challenge_timeout_via_tick_records_score() {
        let mut app = app_with("abcdefghij");
        app.start(GameMode::Challenge, Difficulty::Hard);
        let t0 = Instant::now();
        assert_eq!(
            app.on_input("abcdefghij", t0),
            InputOutcome::Cleared { points: 6 }
        );
        app.on_tick(t0 + Duration::from_secs(10));
        assert_eq!(app.session.status(), Status::InProgress);

        app.on_tick(t0 + Duration::from_secs(30));
        assert_eq!(app.session.status(), Status::TimedOut);
        assert_eq!(app.session.elapsed(), Duration::from_secs(30));
        assert_eq!(app.best.challenge.score, 6);
        assert!(app.last_improvement.score);
        assert_eq!(app.screen, AppScreen::Results);
    }

    #[test]
    fn test_stale_tick_after_reset_leaves_new_session_alone() {
        let mut app = app_with("hello world");
        app.start(GameMode::Challenge, Difficulty::Hard);
        let t0 = Instant::now();
        app.type_char('h', t0);
        let old_id = app.session_id();
        assert!(app.timer().is_some());

        app.reset();
        assert_ne!(app.session_id(), old_id);
        assert!(app.timer().is_none());

        // Long past the old session's deadline.
        app.on_tick(t0 + Duration::from_secs(120));
        assert_eq!(app.session.status(), Status::NotStarted);
        assert_eq!(app.session.elapsed(), Duration::ZERO);
        assert!(app.history.is_empty());
        assert_eq!(app.best, BestRecords::default());
        assert_eq!(app.screen, AppScreen::Session);
    }

    #[test]
    fn test_timer_from_other_session_is_discarded() {
        let mut app = app_with("hello world");
        app.start(GameMode::Challenge, Difficulty::Hard);
        let t0 = Instant::now();
        app.type_char('h', t0);
        app.timer = Some(SessionTimer::arm(
            app.session_id() + 1,
            Duration::from_secs(1),
            t0,
        ));

        app.on_tick(t0 + Duration::from_secs(120));
        assert!(app.timer().is_none());
        assert_eq!(app.session.status(), Status::InProgress);
        assert!(app.history.is_empty());
        assert_eq!(app.screen, AppScreen::Session);
    }

    #[test]
    fn test_history_is_capped() {
        let mut app = app_with("a");
        app.start(GameMode::Practice, Difficulty::Medium);
        let t0 = Instant::now();
        for i in 0..HISTORY_LIMIT as u64 + 3 {
            app.reset();
            app.on_input("a", t0 + Duration::from_secs(i));
        }
        assert_eq!(app.history.len(), HISTORY_LIMIT);
        assert!(app.history.iter().all(|r| r.status == Status::Completed));
    }

    #[test]
    fn test_reset_from_results_returns_to_session() {
        let mut app = app_with("a");
        app.start(GameMode::Practice, Difficulty::Medium);
        app.type_char('a', Instant::now());
        assert_eq!(app.screen, AppScreen::Results);
        app.reset();
        assert_eq!(app.screen, AppScreen::Session);
        assert_eq!(app.session.status(), Status::NotStarted);
    }

    #[test]
    fn test_go_to_menu_discards_running_session() {
        let mut app = app_with("hello");
        app.start(GameMode::Practice, Difficulty::Medium);
        app.type_char('h', Instant::now());
        app.go_to_menu();
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(app.timer().is_none());
        assert!(!app.session.has_started());
    }

    #[test]
    fn test_best_survives_resets() {
        let mut app = app_with("ab");
        app.start(GameMode::Practice, Difficulty::Medium);
        let t0 = Instant::now();
        app.on_input("ab", t0);
        let first = app.best;
        app.reset();
        app.on_input("xb", t0);
        app.on_input("ab", t0);
        assert_eq!(app.best, first);
        assert!(!app.last_improvement.any());
        assert_eq!(app.history.len(), 2);
    }
}
