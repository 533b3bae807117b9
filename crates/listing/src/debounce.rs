use std::time::{Duration, Instant};

/// Quiescence window applied to free-text search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Single-slot trailing-edge debouncer.
///
/// Every [`push`](Self::push) replaces the pending value and restarts the
/// window; [`poll`](Self::poll) hands the value out once the window has
/// elapsed with no further input. There is no leading edge.
///
/// The debouncer owns no timer: the event loop passes the current instant in,
/// and can use [`time_until_due`](Self::time_until_due) to size its wait.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value`, cancelling whatever was pending.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Releases the pending value if its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drops the pending value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// Time left before the pending value is due; `None` when idle.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn releases_after_quiet_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.push("ink", start);

        assert_eq!(debouncer.poll(start + ms(299)), None);
        assert_eq!(debouncer.poll(start + ms(300)), Some("ink"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + ms(900)), None);
    }

    #[test]
    fn burst_of_keystrokes_commits_only_the_last() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        let mut committed = Vec::new();

        for (step, term) in ["i", "in", "ink"].into_iter().enumerate() {
            let now = start + ms(step as u64 * 100);
            debouncer.push(term, now);
            if let Some(value) = debouncer.poll(now) {
                committed.push(value);
            }
        }
        for tick in (200..=1_000).step_by(50) {
            if let Some(value) = debouncer.poll(start + ms(tick)) {
                committed.push(value);
            }
        }

        assert_eq!(committed, vec!["ink"]);
    }

    #[test]
    fn new_input_restarts_the_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.push(1, start);
        debouncer.push(2, start + ms(250));

        assert_eq!(debouncer.poll(start + ms(400)), None);
        assert_eq!(debouncer.time_until_due(start + ms(400)), Some(ms(150)));
        assert_eq!(debouncer.poll(start + ms(550)), Some(2));
    }

    #[test]
    fn cancel_discards_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(10));
        debouncer.push('x', start);
        assert_eq!(debouncer.cancel(), Some('x'));
        assert_eq!(debouncer.poll(start + ms(20)), None);
        assert_eq!(debouncer.time_until_due(start), None);
    }
}
