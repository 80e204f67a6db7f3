use std::sync::Arc;

use crate::clock::{self, PhaseClock, PhaseStamps, TimeSyncError};
use crate::time::Phase;

use super::hooks::{HookControl, PhaseCtx, PhaseHooks};

/// Outcome of one driven frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,

    /// All three readings after the frame's last mark.
    pub stamps: PhaseStamps,

    /// `Exit` if any hook asked to stop.
    pub control: HookControl,
}

/// Reference host scheduler.
///
/// Each `run_frame` marks every phase once, in `Phase::ALL` order, and calls
/// the matching hook right after its mark. A hook returning `Exit` does not cut
/// the frame short: the remaining phases are still stamped so the slots stay
/// consistent for the frame.
#[derive(Debug)]
pub struct FrameDriver {
    clock: Arc<PhaseClock>,
    frame_index: u64,
}

impl FrameDriver {
    pub fn new(clock: Arc<PhaseClock>) -> Self {
        Self {
            clock,
            frame_index: 0,
        }
    }

    /// Drives the process-wide clock.
    pub fn from_global() -> Result<Self, TimeSyncError> {
        clock::require().map(Self::new)
    }

    /// Swaps in a new clock, e.g. after a context reset recreated it.
    ///
    /// The frame counter keeps running.
    pub fn rebind(&mut self, clock: Arc<PhaseClock>) {
        log::debug!(
            "frame driver rebound from clock #{} to #{} at frame {}",
            self.clock.id(),
            clock.id(),
            self.frame_index
        );
        self.clock = clock;
    }

    pub fn clock(&self) -> &Arc<PhaseClock> {
        &self.clock
    }

    /// Index the next `run_frame` will use.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Runs one frame.
    pub fn run_frame<H>(&mut self, hooks: &mut H) -> FrameReport
    where
        H: PhaseHooks + ?Sized,
    {
        let mut control = HookControl::Continue;

        for phase in Phase::ALL {
            self.clock.mark(phase);

            let ctx = PhaseCtx {
                phase,
                frame_index: self.frame_index,
                timestamp: self.clock.get(phase),
                clock: &self.clock,
            };

            if hooks.on_phase(&ctx) == HookControl::Exit {
                control = HookControl::Exit;
            }
        }

        let report = FrameReport {
            frame_index: self.frame_index,
            stamps: self.clock.stamps(),
            control,
        };

        log::trace!("frame {} stamped: {:?}", report.frame_index, report.stamps);

        self.frame_index = self.frame_index.wrapping_add(1);
        report
    }
}
