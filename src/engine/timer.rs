//! Challenge countdown
//!
//! The timer never schedules itself. The host calls `tick` once per second
//! while a challenge runs, and the session decides what expiry means.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    remaining: u32,
    total: u32,
    armed: bool,
}

impl Timer {
    /// Arm the countdown with `remaining = total = duration_seconds`
    pub fn start(&mut self, duration_seconds: u32) {
        self.remaining = duration_seconds;
        self.total = duration_seconds;
        self.armed = true;
    }

    /// Advance by one second. Returns true if the countdown is now expired.
    pub fn tick(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.is_expired()
    }

    /// Shift the remaining time; floored at zero, no upper bound
    pub fn adjust(&mut self, delta_seconds: i64) {
        if !self.armed {
            return;
        }
        let next = i64::from(self.remaining).saturating_add(delta_seconds);
        self.remaining = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
    }

    pub fn is_expired(&self) -> bool {
        self.armed && self.remaining == 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Remaining time as a share of the initial duration, in percent.
    /// May exceed 100 after the timer was extended.
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.remaining) / f64::from(self.total) * 100.0
    }

    pub fn clock(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Format seconds as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_sets_remaining_and_total() {
        let mut timer = Timer::default();
        timer.start(480);

        assert_eq!(timer.remaining(), 480);
        assert_eq!(timer.total(), 480);
        assert!(!timer.is_expired());
    }

    #[test]
    fn test_tick_counts_down_and_floors_at_zero() {
        let mut timer = Timer::default();
        timer.start(2);

        assert!(!timer.tick());
        assert_eq!(timer.remaining(), 1);
        assert!(timer.tick());
        assert_eq!(timer.remaining(), 0);

        // Extra ticks stay at zero
        assert!(timer.tick());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_adjust_floors_at_zero() {
        let mut timer = Timer::default();
        timer.start(5);

        timer.adjust(-10);
        assert_eq!(timer.remaining(), 0);
        assert!(timer.is_expired());
    }

    #[test]
    fn test_adjust_can_exceed_total() {
        let mut timer = Timer::default();
        timer.start(30);

        timer.adjust(10);
        assert_eq!(timer.remaining(), 40);
        assert_eq!(timer.total(), 30);
        assert!(timer.progress_percent() > 100.0);
    }

    #[test]
    fn test_adjust_saturates_on_huge_delta() {
        let mut timer = Timer::default();
        timer.start(30);

        timer.adjust(i64::MAX);
        assert_eq!(timer.remaining(), u32::MAX);
    }

    #[test]
    fn test_idle_timer_ignores_tick_and_adjust() {
        let mut timer = Timer::default();

        assert!(!timer.tick());
        timer.adjust(30);
        assert_eq!(timer.remaining(), 0);
        assert!(!timer.is_expired(), "an unarmed timer never reports expiry");
    }

    #[test]
    fn test_reset_disarms() {
        let mut timer = Timer::default();
        timer.start(60);
        timer.reset();

        assert_eq!(timer, Timer::default());
        assert!(!timer.is_armed());
        assert_eq!(timer.progress_percent(), 0.0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(480), "8:00");
        assert_eq!(format_clock(1085), "18:05");
    }
}
