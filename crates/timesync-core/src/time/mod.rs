//! Time subsystem.
//!
//! Clock sources and the fixed set of per-frame phases they are sampled at.
//! Intended usage:
//! - pick one `ClockSource` per process (usually `MonotonicClock`)
//! - use `ManualClock` where readings must be scripted

mod phase;
mod source;

pub use phase::Phase;
pub use source::{ClockSource, ManualClock, MonotonicClock};
