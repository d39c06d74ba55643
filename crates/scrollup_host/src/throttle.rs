//! Rate limiting for high-frequency callbacks
//!
//! [`throttle`] wraps a callback so it runs at most once per interval,
//! always with the most recent value offered. It is independent of any
//! event framework: time arrives through the call sites, so behavior is a
//! pure function of the timestamps handed in.
//!
//! Values offered while the window is closed are dropped, never queued;
//! the last one offered is held as pending and runs when [`flush`] is
//! called with the window open again. Frame-driven hosts call `flush` once
//! per frame.
//!
//! [`flush`]: Throttled::flush

/// Create a rate-limited wrapper around `func`.
///
/// With `interval_ms == 0` every offered value runs immediately.
pub fn throttle<T, F>(interval_ms: u64, func: F) -> Throttled<T, F>
where
    F: FnMut(T),
{
    Throttled {
        interval_ms,
        last_run: None,
        pending: None,
        func,
    }
}

/// A callback wrapped by [`throttle`]
pub struct Throttled<T, F> {
    interval_ms: u64,
    /// Clock value of the most recent run
    last_run: Option<u64>,
    /// Most recent value offered while the window was closed
    pending: Option<T>,
    func: F,
}

impl<T, F: FnMut(T)> Throttled<T, F> {
    /// Offer a new value at `now_ms`.
    ///
    /// Runs immediately when the window is open; otherwise the value
    /// replaces any earlier pending value.
    pub fn notify(&mut self, value: T, now_ms: u64) {
        if self.window_open(now_ms) {
            self.run(value, now_ms);
        } else {
            self.pending = Some(value);
        }
    }

    /// Run the pending value if the window has reopened
    pub fn flush(&mut self, now_ms: u64) {
        if !self.window_open(now_ms) {
            return;
        }
        if let Some(value) = self.pending.take() {
            self.run(value, now_ms);
        }
    }

    /// Whether a dropped value is waiting for the window to reopen
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn window_open(&self, now_ms: u64) -> bool {
        match self.last_run {
            Some(at) => now_ms.saturating_sub(at) >= self.interval_ms,
            None => true,
        }
    }

    fn run(&mut self, value: T, now_ms: u64) {
        self.pending = None;
        self.last_run = Some(now_ms);
        (self.func)(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording() -> (Rc<RefCell<Vec<f32>>>, impl FnMut(f32)) {
        let runs = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&runs);
        (runs, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn test_first_notify_runs_immediately() {
        let (runs, sink) = recording();
        let mut t = throttle(250, sink);

        t.notify(100.0, 0);
        assert_eq!(*runs.borrow(), vec![100.0]);
    }

    #[test]
    fn test_in_window_values_are_dropped_not_queued() {
        let (runs, sink) = recording();
        let mut t = throttle(250, sink);

        t.notify(100.0, 0);
        t.notify(110.0, 50);
        t.notify(120.0, 100);
        t.notify(130.0, 150);

        // Only the leading run happened; the rest collapsed into one pending
        assert_eq!(*runs.borrow(), vec![100.0]);
        assert!(t.has_pending());
    }

    #[test]
    fn test_flush_runs_most_recent_pending() {
        let (runs, sink) = recording();
        let mut t = throttle(250, sink);

        t.notify(100.0, 0);
        t.notify(110.0, 50);
        t.notify(120.0, 100);

        // Window still closed: flush does nothing
        t.flush(200);
        assert_eq!(*runs.borrow(), vec![100.0]);

        // Window reopens: the last offered value runs
        t.flush(250);
        assert_eq!(*runs.borrow(), vec![100.0, 120.0]);
        assert!(!t.has_pending());
    }

    #[test]
    fn test_notify_after_window_runs_with_own_value() {
        let (runs, sink) = recording();
        let mut t = throttle(250, sink);

        t.notify(100.0, 0);
        t.notify(110.0, 50);
        // A fresh notification after expiry supersedes the pending value
        t.notify(300.0, 300);

        assert_eq!(*runs.borrow(), vec![100.0, 300.0]);
        assert!(!t.has_pending());
    }

    #[test]
    fn test_at_most_one_run_per_window() {
        let (runs, sink) = recording();
        let mut t = throttle(100, sink);

        for i in 0u64..50 {
            t.notify(i as f32, i * 10);
            t.flush(i * 10);
        }

        // 50 notifications over 490ms at a 100ms interval: runs at
        // t=0,100,200,300,400 only
        assert_eq!(*runs.borrow(), vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_zero_interval_never_gates() {
        let (runs, sink) = recording();
        let mut t = throttle(0, sink);

        t.notify(1.0, 0);
        t.notify(2.0, 0);
        assert_eq!(*runs.borrow(), vec![1.0, 2.0]);
    }
}
