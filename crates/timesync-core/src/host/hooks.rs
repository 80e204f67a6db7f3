use crate::clock::PhaseClock;
use crate::time::Phase;

/// Control directive returned by phase hooks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HookControl {
    Continue,
    Exit,
}

/// Per-phase context passed to `PhaseHooks`.
#[derive(Debug, Copy, Clone)]
pub struct PhaseCtx<'a> {
    pub phase: Phase,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,

    /// Reading stored for `phase` just before the hook was called.
    pub timestamp: f64,

    pub clock: &'a PhaseClock,
}

/// Code that runs after each phase is stamped.
///
/// Every method defaults to a no-op so hosts only implement the phases they
/// care about.
pub trait PhaseHooks {
    fn on_physics_step(&mut self, ctx: &PhaseCtx<'_>) -> HookControl {
        let _ = ctx;
        HookControl::Continue
    }

    fn on_update(&mut self, ctx: &PhaseCtx<'_>) -> HookControl {
        let _ = ctx;
        HookControl::Continue
    }

    fn on_late_update(&mut self, ctx: &PhaseCtx<'_>) -> HookControl {
        let _ = ctx;
        HookControl::Continue
    }

    /// Dispatches to the method for `ctx.phase`.
    fn on_phase(&mut self, ctx: &PhaseCtx<'_>) -> HookControl {
        match ctx.phase {
            Phase::PhysicsStep => self.on_physics_step(ctx),
            Phase::Update => self.on_update(ctx),
            Phase::LateUpdate => self.on_late_update(ctx),
        }
    }
}

/// No hooks at all; the driver only stamps.
impl PhaseHooks for () {}
