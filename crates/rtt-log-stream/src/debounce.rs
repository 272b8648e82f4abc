//! Debounced text input shared by the filter and highlight stages

use std::time::{Duration, Instant};

/// Quiet period an input must stay unchanged before it is applied
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Pending/applied pair with its change timer
#[derive(Debug, Clone, Default)]
pub struct DebouncedInput {
    pending: String,
    applied: String,
    last_change: Option<Instant>,
}

impl DebouncedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current input text.
    ///
    /// Restarts the quiet period only when the text actually differs from the
    /// pending one. Returns whether it did.
    pub fn set(&mut self, text: &str, now: Instant) -> bool {
        if text == self.pending {
            return false;
        }
        self.pending = text.to_string();
        self.last_change = Some(now);
        true
    }

    /// Apply the pending text if the quiet period has elapsed.
    ///
    /// Returns true exactly once per applied change.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.applied.clone_from(&self.pending);
        true
    }

    /// A pending edit has been quiet long enough to be applied at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        self.has_pending_edit()
            && self
                .last_change
                .is_none_or(|changed| now.saturating_duration_since(changed) > DEBOUNCE_WINDOW)
    }

    /// An edit is waiting for its quiet period
    pub fn has_pending_edit(&self) -> bool {
        self.pending != self.applied
    }

    pub fn applied(&self) -> &str {
        &self.applied
    }

    /// Back to empty pending and applied strings
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_applies_after_quiet_period() {
        let t0 = Instant::now();
        let mut input = DebouncedInput::new();
        assert!(input.set("error", t0));
        assert!(input.has_pending_edit());

        assert!(!input.poll(t0 + ms(100)));
        assert!(!input.poll(t0 + ms(500)), "window is exclusive");
        assert!(input.poll(t0 + ms(501)));
        assert_eq!(input.applied(), "error");
        assert!(!input.has_pending_edit());

        // Fires once
        assert!(!input.poll(t0 + ms(2000)));
    }

    #[test]
    fn test_is_due_matches_poll() {
        let t0 = Instant::now();
        let mut input = DebouncedInput::new();
        assert!(!input.is_due(t0));

        input.set("error", t0);
        assert!(!input.is_due(t0 + ms(500)));
        assert!(input.is_due(t0 + ms(501)));
        assert!(input.poll(t0 + ms(501)));
        assert!(!input.is_due(t0 + ms(501)));
    }

    #[test]
    fn test_same_text_does_not_restart_timer() {
        let t0 = Instant::now();
        let mut input = DebouncedInput::new();
        input.set("err", t0);
        assert!(!input.set("err", t0 + ms(400)));
        assert!(input.poll(t0 + ms(600)));
    }

    #[test]
    fn test_new_edit_restarts_timer() {
        let t0 = Instant::now();
        let mut input = DebouncedInput::new();
        input.set("e", t0);
        input.set("er", t0 + ms(400));
        assert!(!input.poll(t0 + ms(600)));
        assert!(input.poll(t0 + ms(901)));
        assert_eq!(input.applied(), "er");
    }

    #[test]
    fn test_reverting_edit_cancels_pending() {
        let t0 = Instant::now();
        let mut input = DebouncedInput::new();
        input.set("x", t0);
        input.set("", t0 + ms(100));
        assert!(!input.has_pending_edit());
        assert!(!input.poll(t0 + ms(1000)));
    }

    #[test]
    fn test_reset() {
        let t0 = Instant::now();
        let mut input = DebouncedInput::new();
        input.set("x", t0);
        input.poll(t0 + ms(600));
        input.reset();
        assert!(!input.has_pending_edit());
        assert_eq!(input.applied(), "");
    }
}
