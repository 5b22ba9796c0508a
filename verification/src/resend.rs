//! Resend window timer for one-time-code flows.

/// Countdown before another one-time code may be requested.
///
/// The engine performs no scheduling of its own: the host calls
/// [`ResendTimer::tick`] once per elapsed wall-clock second while the
/// flow is awaiting a code. Requests inside the window are refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResendTimer {
    seconds_remaining: u32,
    window_secs: u32,
}

impl ResendTimer {
    /// Start a timer with the full window ahead of it.
    pub fn new(window_secs: u32) -> Self {
        Self {
            seconds_remaining: window_secs,
            window_secs,
        }
    }

    /// Advance by one second, flooring at zero. Returns the new
    /// remaining count.
    pub fn tick(&mut self) -> u32 {
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.seconds_remaining
    }

    /// Seconds left before a resend is permitted.
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Whether the window has elapsed.
    pub fn can_resend(&self) -> bool {
        self.seconds_remaining == 0
    }

    /// Restart the full window after a successful resend.
    pub fn reset(&mut self) {
        self.seconds_remaining = self.window_secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resend_refused_until_window_elapses() {
        let mut timer = ResendTimer::new(120);
        for _ in 0..119 {
            timer.tick();
        }
        assert_eq!(timer.seconds_remaining(), 1);
        assert!(!timer.can_resend());

        timer.tick();
        assert!(timer.can_resend());
    }

    #[test]
    fn tick_floors_at_zero() {
        let mut timer = ResendTimer::new(2);
        timer.tick();
        timer.tick();
        assert_eq!(timer.tick(), 0);
        assert!(timer.can_resend());
    }

    #[test]
    fn reset_restarts_the_full_window() {
        let mut timer = ResendTimer::new(120);
        for _ in 0..120 {
            timer.tick();
        }
        assert!(timer.can_resend());

        timer.reset();
        assert_eq!(timer.seconds_remaining(), 120);
        assert!(!timer.can_resend());
    }
}
