//! Fixed-timestep scheduling.
//!
//! The clock never sleeps or looks at the wall time itself. The run loop
//! feeds it the time that passed and asks how many simulation steps are
//! due, so the game speed does not depend on how long input handling or
//! drawing took, and tests can drive it with made-up durations.

use std::time::Duration;

pub struct TickClock {
    interval: Duration,
    residual: Duration,
    ticks: u64,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        assert!(interval > Duration::from_secs(0));
        TickClock { interval, residual: Duration::from_secs(0), ticks: 0 }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total number of ticks handed out so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Records that `elapsed` time has passed since the last call.
    pub fn accumulate(&mut self, elapsed: Duration) {
        self.residual += elapsed;
    }

    /// Returns `true` and consumes one interval if a tick is due. Meant to
    /// be called in a `while` loop so that lost time is caught up.
    pub fn check_update_time(&mut self) -> bool {
        if self.residual >= self.interval {
            self.residual -= self.interval;
            self.ticks += 1;
            true
        } else {
            false
        }
    }

    /// How long until the next tick is due, zero if one already is.
    pub fn time_until_next(&self) -> Duration {
        self.interval.checked_sub(self.residual).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_due_before_first_interval() {
        let mut clock = TickClock::new(ms(200));
        clock.accumulate(ms(199));
        assert!(!clock.check_update_time());
        assert_eq!(clock.time_until_next(), ms(1));
    }

    #[test]
    fn catches_up_and_keeps_remainder() {
        let mut clock = TickClock::new(ms(200));
        clock.accumulate(ms(450));

        let mut due = 0;
        while clock.check_update_time() {
            due += 1;
        }

        assert_eq!(due, 2);
        assert_eq!(clock.ticks(), 2);
        assert_eq!(clock.time_until_next(), ms(150));
    }

    #[test]
    fn small_steps_add_up() {
        let mut clock = TickClock::new(ms(200));
        let mut due = 0;
        for _ in 0..100 {
            clock.accumulate(ms(10));
            while clock.check_update_time() {
                due += 1;
            }
        }
        assert_eq!(due, 5);
        assert_eq!(clock.time_until_next(), ms(200));
    }

    #[test]
    fn overdue_means_no_wait() {
        let mut clock = TickClock::new(ms(200));
        clock.accumulate(ms(250));
        assert_eq!(clock.time_until_next(), Duration::from_secs(0));
    }
}
