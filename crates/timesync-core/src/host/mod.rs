//! Host-facing contracts.
//!
//! Defines the interface between a host's per-frame scheduler and the phase
//! clock. `FrameDriver` is a reference scheduler that honours the ordering
//! contract: physics step, update, late update, each marked before its hooks
//! run.

mod driver;
mod hooks;

pub use driver::{FrameDriver, FrameReport};
pub use hooks::{HookControl, PhaseCtx, PhaseHooks};
