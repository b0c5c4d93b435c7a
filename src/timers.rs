//! One-shot delayed actions
//!
//! A deadline list the host services from its frame or timeout callbacks.
//! Actions are plain values; the owner decides what firing one means.

/// A pending action
#[derive(Debug, Clone)]
struct Timer<T> {
    fire_at: f64,
    seq: u64,
    action: T,
}

/// Deadline list of `(fire_at, action)` pairs
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    timers: Vec<Timer<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_seq: 0,
        }
    }

    /// Queue `action` to fire at the absolute time `fire_at` (ms)
    pub fn schedule_at(&mut self, fire_at: f64, action: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            fire_at,
            seq,
            action,
        });
    }

    /// Queue `action` to fire `delay_ms` after `now_ms`
    pub fn schedule_after(&mut self, now_ms: f64, delay_ms: f64, action: T) {
        self.schedule_at(now_ms + delay_ms, action);
    }

    /// Drop every pending action matching `pred`; returns how many were dropped
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| !pred(&t.action));
        before - self.timers.len()
    }

    /// Remove and return every action due at `now_ms`, earliest first.
    /// Actions sharing a deadline come out in the order they were queued.
    pub fn poll(&mut self, now_ms: f64) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.fire_at <= now_ms);
        self.timers = pending;

        due.sort_by(|a, b| {
            a.fire_at
                .partial_cmp(&b.fire_at)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.seq.cmp(&b.seq))
        });
        due.into_iter().map(|t| t.action).collect()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers
            .iter()
            .map(|t| t.fire_at)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// What a host keeping a single platform timeout must do so that it fires at
/// the scheduler's next deadline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostTimeout {
    /// The pending timeout already matches
    Keep,
    /// Cancel the pending timeout; nothing is queued
    Clear,
    /// Cancel any pending timeout, then arm one for this deadline
    Arm(f64),
}

/// Compare the armed deadline with the next one
pub fn host_timeout(armed: Option<f64>, next: Option<f64>) -> HostTimeout {
    if armed == next {
        return HostTimeout::Keep;
    }
    match next {
        Some(deadline) => HostTimeout::Arm(deadline),
        None => HostTimeout::Clear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_returns_due_in_order() {
        let mut s = Scheduler::new();
        s.schedule_at(300.0, "c");
        s.schedule_at(100.0, "a");
        s.schedule_at(100.0, "b");
        s.schedule_at(900.0, "late");

        assert!(s.poll(50.0).is_empty());
        assert_eq!(s.poll(300.0), vec!["a", "b", "c"]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.next_deadline(), Some(900.0));
        assert_eq!(s.poll(1_000.0), vec!["late"]);
        assert!(s.is_empty());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_cancel_where() {
        let mut s = Scheduler::new();
        s.schedule_after(0.0, 500.0, 1);
        s.schedule_after(0.0, 500.0, 2);
        s.schedule_after(0.0, 600.0, 1);
        assert_eq!(s.cancel_where(|a| *a == 1), 2);
        assert_eq!(s.poll(1_000.0), vec![2]);
    }

    #[test]
    fn test_host_timeout_follows_next_deadline() {
        assert_eq!(host_timeout(None, None), HostTimeout::Keep);
        assert_eq!(host_timeout(Some(600.0), Some(600.0)), HostTimeout::Keep);
        assert_eq!(host_timeout(None, Some(550.0)), HostTimeout::Arm(550.0));
        assert_eq!(host_timeout(Some(600.0), None), HostTimeout::Clear);
    }

    #[test]
    fn test_host_timeout_replaces_on_debounce() {
        // Each resize pushes the debounce deadline out; the old timeout must go
        let mut s = Scheduler::new();
        s.schedule_at(500.0, "settle");
        let mut armed = None;
        if let HostTimeout::Arm(at) = host_timeout(armed, s.next_deadline()) {
            armed = Some(at);
        }
        assert_eq!(armed, Some(500.0));

        s.cancel_where(|a| *a == "settle");
        s.schedule_at(800.0, "settle");
        assert_eq!(host_timeout(armed, s.next_deadline()), HostTimeout::Arm(800.0));

        s.cancel_where(|_| true);
        assert_eq!(host_timeout(armed, s.next_deadline()), HostTimeout::Clear);
    }
}
