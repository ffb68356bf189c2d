use std::time::{Duration, Instant};

/// Coalesces rapid updates into one, released after `delay` of quiet.
///
/// Time is passed in by the caller so the policy can be driven from the
/// event loop's tick and from tests alike.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new value, restarting the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Releases the pending value once `delay` has elapsed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(
            &self.pending,
            Some((_, changed_at)) if now.saturating_duration_since(*changed_at) >= self.delay
        );
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn test_nothing_pending_initially() {
        let mut debouncer: Debouncer<String> = Debouncer::new(DELAY);
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(Instant::now()), None);
    }

    #[test]
    fn test_value_released_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("a", start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(start + DELAY), Some("a"));
        assert_eq!(debouncer.poll(start + DELAY * 2), None);
    }

    #[test]
    fn test_new_push_restarts_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("s", start);
        debouncer.push("sm", start + Duration::from_millis(200));
        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), Some("sm"));
    }

    #[test]
    fn test_flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push(1, start);
        assert_eq!(debouncer.flush(), Some(1));
        debouncer.push(2, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + DELAY), None);
    }
}
