//! Timesync core crate.
//!
//! Stamps each per-frame update phase with a monotonic reading and exposes the
//! readings through a process-wide clock. The host's scheduler drives it.

pub mod time;
pub mod clock;
pub mod host;

pub mod logging;

pub use clock::{
    context_reset, create, instance, require, teardown, PhaseClock, PhaseClockConfig,
    PhaseStamps, Registration, Registry, ResetOutcome, TimeSyncError, SENTINEL,
};
pub use time::{ClockSource, ManualClock, MonotonicClock, Phase};
