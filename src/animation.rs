//! Counter animation for the summary figures.
//!
//! A counter slides linearly from the previously shown value to the new one
//! over a fixed duration. Retargeting mid-flight starts a fresh animation from
//! whatever is currently on screen, superseding the old one.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct CounterAnimation {
    duration: Duration,
    from: f64,
    to: f64,
    started: Option<Instant>,
}

impl CounterAnimation {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            from: 0.0,
            to: 0.0,
            started: None,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn retarget(&mut self, to: f64, now: Instant) {
        self.from = self.value_at(now);
        self.to = to;
        self.started = Some(now);
    }

    pub fn is_running(&self, now: Instant) -> bool {
        match self.started {
            Some(start) => now.saturating_duration_since(start) < self.duration,
            None => false,
        }
    }

    /// Displayed value at `now`: floored while running, exact once finished.
    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(start) = self.started else {
            return self.to;
        };
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= self.duration || self.duration.is_zero() {
            return self.to;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.from + (self.to - self.from) * progress).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(300);

    #[test]
    fn interpolates_and_floors() {
        let start = Instant::now();
        let mut counter = CounterAnimation::new(DURATION);
        counter.retarget(1_000.5, start);

        assert_eq!(counter.value_at(start), 0.0);
        assert_eq!(counter.value_at(start + Duration::from_millis(150)), 500.0);
        assert!(counter.is_running(start + Duration::from_millis(299)));
    }

    #[test]
    fn lands_exactly_on_target() {
        let start = Instant::now();
        let mut counter = CounterAnimation::new(DURATION);
        counter.retarget(8_791.59, start);

        let end = start + DURATION;
        assert!(!counter.is_running(end));
        assert_eq!(counter.value_at(end), 8_791.59);
        assert_eq!(counter.value_at(end + Duration::from_secs(5)), 8_791.59);
    }

    #[test]
    fn retarget_supersedes_running_animation() {
        let start = Instant::now();
        let mut counter = CounterAnimation::new(DURATION);
        counter.retarget(1_000.0, start);

        let midway = start + Duration::from_millis(150);
        counter.retarget(0.0, midway);
        assert_eq!(counter.target(), 0.0);
        assert_eq!(counter.value_at(midway), 500.0);
        assert_eq!(counter.value_at(midway + Duration::from_millis(150)), 250.0);
        assert_eq!(counter.value_at(midway + DURATION), 0.0);
    }
}
