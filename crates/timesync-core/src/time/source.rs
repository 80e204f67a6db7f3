use std::collections::VecDeque;
use std::sync::OnceLock;
use std::time::Instant;

use parking_lot::Mutex;

/// Monotonic time reference in seconds.
///
/// Readings are only meaningful relative to each other: ordering and
/// durations, never wall-clock time. Implementations must be callable from
/// any thread.
pub trait ClockSource: Send + Sync {
    /// Current reading in seconds.
    fn now(&self) -> f64;
}

/// Any `Fn() -> f64` works as a clock, e.g. an external timing library's
/// `local_clock` binding.
impl<F> ClockSource for F
where
    F: Fn() -> f64 + Send + Sync,
{
    fn now(&self) -> f64 {
        self()
    }
}

/// Process-wide epoch, captured on first use.
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Smallest reading `MonotonicClock` reports; `0.0` is reserved for
/// "never sampled".
const MIN_READING: f64 = 1e-9;

/// Seconds elapsed since a process-wide epoch, backed by `std::time::Instant`.
#[derive(Debug, Copy, Clone, Default)]
pub struct MonotonicClock;

impl MonotonicClock {
    /// Pins the epoch. Optional; the first `now()` does the same.
    pub fn init() {
        EPOCH.get_or_init(Instant::now);
    }

    /// The instant all readings are measured from.
    pub fn epoch() -> Instant {
        *EPOCH.get_or_init(Instant::now)
    }
}

impl ClockSource for MonotonicClock {
    #[inline]
    fn now(&self) -> f64 {
        Self::epoch().elapsed().as_secs_f64().max(MIN_READING)
    }
}

/// Host-driven clock.
///
/// Scripted readings are consumed in order, one per `now()`. Once the queue is
/// drained the clock keeps returning the last value it reported (or the value
/// given to `set`/`advance`).
#[derive(Debug, Default)]
pub struct ManualClock {
    inner: Mutex<ManualState>,
}

#[derive(Debug, Default)]
struct ManualState {
    scripted: VecDeque<f64>,
    current: f64,
}

impl ManualClock {
    /// Creates a clock that reads `start` until told otherwise.
    pub fn new(start: f64) -> Self {
        Self {
            inner: Mutex::new(ManualState {
                scripted: VecDeque::new(),
                current: start,
            }),
        }
    }

    /// Creates a clock that replays `readings` in order.
    pub fn with_readings<I>(readings: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            inner: Mutex::new(ManualState {
                scripted: readings.into_iter().collect(),
                current: 0.0,
            }),
        }
    }

    /// Queues one more scripted reading.
    pub fn push(&self, reading: f64) {
        self.inner.lock().scripted.push_back(reading);
    }

    /// Sets the fallback reading and drops any queued ones.
    pub fn set(&self, reading: f64) {
        let mut state = self.inner.lock();
        state.scripted.clear();
        state.current = reading;
    }

    /// Moves the fallback reading forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.inner.lock().current += seconds;
    }

    /// Number of scripted readings not yet consumed.
    pub fn pending(&self) -> usize {
        self.inner.lock().scripted.len()
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> f64 {
        let mut state = self.inner.lock();
        if let Some(next) = state.scripted.pop_front() {
            state.current = next;
        }
        state.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── MonotonicClock ────────────────────────────────────────────────────

    #[test]
    fn monotonic_never_reads_zero() {
        MonotonicClock::init();
        assert!(MonotonicClock.now() > 0.0);
    }

    #[test]
    fn monotonic_does_not_go_backward() {
        let clock = MonotonicClock;
        let t1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let t2 = clock.now();
        assert!(t2 > t1);
        assert!(t2 - t1 >= 0.002);
    }

    // ── ManualClock ───────────────────────────────────────────────────────

    #[test]
    fn manual_replays_scripted_readings_in_order() {
        let clock = ManualClock::with_readings([1.0, 1.001, 1.002]);
        assert_eq!(clock.now(), 1.0);
        assert_eq!(clock.now(), 1.001);
        assert_eq!(clock.now(), 1.002);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn manual_holds_last_reading_when_drained() {
        let clock = ManualClock::with_readings([4.5]);
        assert_eq!(clock.now(), 4.5);
        assert_eq!(clock.now(), 4.5);
    }

    #[test]
    fn manual_set_drops_queue() {
        let clock = ManualClock::with_readings([1.0, 2.0]);
        clock.set(10.0);
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.now(), 10.0);
    }

    #[test]
    fn manual_advance_moves_fallback() {
        let clock = ManualClock::new(1.0);
        clock.advance(0.25);
        assert_eq!(clock.now(), 1.25);
        clock.push(3.0);
        assert_eq!(clock.now(), 3.0);
    }

    // ── closures ──────────────────────────────────────────────────────────

    #[test]
    fn closure_is_a_clock_source() {
        let clock = || 42.0;
        assert_eq!(ClockSource::now(&clock), 42.0);
    }
}
