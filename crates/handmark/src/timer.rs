//! Performance measurement.

use std::{
    fmt, mem,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

/// A timer that can measure and average the time an operation takes.
///
/// Collected timings are averaged and reset when the timer is displayed using `{}`
/// ([`std::fmt::Display`]).
pub struct Timer {
    name: &'static str,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    total: Duration,
    count: u32,
}

impl Timer {
    /// Creates a new timer.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(State::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes a closure, measuring and recording the time it takes.
    pub fn time<T>(&self, timee: impl FnOnce() -> T) -> T {
        let _guard = self.start();
        timee()
    }

    /// Starts timing an operation using a drop guard.
    ///
    /// When the returned [`TimerGuard`] is dropped, the time between the call to `start` and the
    /// drop is measured and recorded.
    pub fn start(&self) -> TimerGuard<'_> {
        TimerGuard {
            start: Instant::now(),
            timer: self,
        }
    }

    /// Returns the number of measurements recorded since the timer was last displayed.
    pub fn count(&self) -> u32 {
        self.lock().count
    }

    /// Returns the average of the measurements recorded since the timer was last displayed.
    pub fn average(&self) -> Option<Duration> {
        let state = self.lock();
        (state.count > 0).then(|| state.total / state.count)
    }

    fn stop(&self, start: Instant) {
        let mut state = self.lock();
        state.total += start.elapsed();
        state.count += 1;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panic while holding the lock cannot leave `State` inconsistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Displays the average recorded time and resets it.
impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = mem::take(&mut *self.lock());
        let avg_ms = if state.count == 0 {
            0.0
        } else {
            (state.total / state.count).as_secs_f32() * 1000.0
        };

        write!(f, "{}: {}x{avg_ms:.01}ms", self.name, state.count)
    }
}

/// Cloning a timer resets its collected timings.
impl Clone for Timer {
    fn clone(&self) -> Self {
        Self::new(self.name)
    }
}

/// Guard returned by [`Timer::start`]. Stops timing the operation when dropped.
pub struct TimerGuard<'a> {
    start: Instant,
    timer: &'a Timer,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.stop(self.start);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn records_and_resets() {
        let timer = Timer::new("sleep");
        assert_eq!(timer.average(), None);

        let value = timer.time(|| {
            thread::sleep(Duration::from_millis(2));
            7
        });
        assert_eq!(value, 7);
        {
            let _guard = timer.start();
        }
        assert_eq!(timer.count(), 2);
        assert!(timer.average().unwrap() >= Duration::from_millis(1));

        let shown = timer.to_string();
        assert!(shown.starts_with("sleep: 2x"), "{shown}");
        assert!(shown.ends_with("ms"), "{shown}");
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.to_string(), "sleep: 0x0.0ms");
    }

    #[test]
    fn clone_resets() {
        let timer = Timer::new("t");
        timer.time(|| ());
        let clone = timer.clone();
        assert_eq!(clone.name(), "t");
        assert_eq!(clone.count(), 0);
        assert_eq!(timer.count(), 1);
    }
}
