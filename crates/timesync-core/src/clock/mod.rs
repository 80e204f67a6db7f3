//! Phase clock subsystem.
//!
//! `PhaseClock` caches one reading per `Phase`. The registry keeps at most one
//! live clock per process and enforces first-writer-wins construction:
//! - `create` installs a clock, or discards it if one is already live
//! - `instance` returns the live clock, if any
//! - `context_reset` / `teardown` retire it

mod config;
mod error;
mod phase_clock;
mod registry;

pub use config::PhaseClockConfig;
pub use error::TimeSyncError;
pub use phase_clock::{PhaseClock, PhaseStamps, SENTINEL};
pub use registry::{
    context_reset, create, instance, require, teardown, Registration, Registry, ResetOutcome,
};
