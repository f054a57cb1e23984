use std::time::{Duration, Instant};

/// Periodic clock for one session. Tagged with the id of the session that
/// armed it so a tick can never reach a session it was not meant for.
#[derive(Clone, Copy, Debug)]
pub struct SessionTimer {
    session_id: u64,
    interval: Duration,
    next_due: Instant,
}

impl SessionTimer {
    pub fn arm(session_id: u64, interval: Duration, now: Instant) -> Self {
        Self {
            session_id,
            interval,
            next_due: now + interval,
        }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// True when the timer is due at `now`; schedules the following fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_interval() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::arm(1, Duration::from_secs(1), t0);
        assert!(!timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(999)));
        assert!(timer.poll(t0 + Duration::from_secs(1)));
        assert!(!timer.poll(t0 + Duration::from_millis(1500)));
        assert!(timer.poll(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn test_late_poll_fires_once() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::arm(7, Duration::from_millis(100), t0);
        assert!(timer.poll(t0 + Duration::from_secs(5)));
        assert!(!timer.poll(t0 + Duration::from_millis(5050)));
        assert_eq!(timer.session_id(), 7);
    }

    #[test]
    fn test_zero_interval_always_due() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::arm(1, Duration::ZERO, t0);
        assert!(timer.poll(t0));
        assert!(timer.poll(t0));
    }
}
