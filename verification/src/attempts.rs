//! Wrong-credential attempt counting.

/// Remaining wrong-credential submissions before lockout.
///
/// Decremented only by a rejected full-length submission. There is no
/// reset: the counter lives and dies with one flow instance, and a
/// fresh flow starts with a fresh counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptCounter {
    remaining: u32,
}

impl AttemptCounter {
    /// Start a counter with `max_attempts` permitted rejections.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            remaining: max_attempts,
        }
    }

    /// Submissions still permitted before lockout.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Record one rejected submission, returning the new remaining count.
    pub fn record_rejection(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Whether lockout has been reached.
    pub fn exhausted(&self) -> bool {
        self.remaining == 0
    }
}
