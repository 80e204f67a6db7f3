use std::sync::Arc;

use anyhow::{Context, Result};

use timesync_core::host::{FrameDriver, FrameReport, HookControl, PhaseCtx, PhaseHooks};
use timesync_core::{ClockSource, Phase, PhaseClockConfig, ResetOutcome};

use crate::config::HostConfig;

/// Logs each stamp and flags readings that went backward since the previous
/// frame. Readings are never corrected.
#[derive(Debug, Default)]
struct StampLogger {
    previous: [Option<f64>; Phase::COUNT],
    backward_jumps: u64,
}

impl StampLogger {
    fn observe(&mut self, ctx: &PhaseCtx<'_>) -> HookControl {
        log::debug!("frame {} {}: {:.6}", ctx.frame_index, ctx.phase, ctx.timestamp);

        let slot = &mut self.previous[ctx.phase.index()];
        if let Some(prev) = *slot {
            if ctx.timestamp < prev {
                self.backward_jumps += 1;
                log::warn!(
                    "{} went backward: {prev:.6} -> {:.6}",
                    ctx.phase,
                    ctx.timestamp
                );
            }
        }
        *slot = Some(ctx.timestamp);

        HookControl::Continue
    }
}

impl PhaseHooks for StampLogger {
    fn on_phase(&mut self, ctx: &PhaseCtx<'_>) -> HookControl {
        self.observe(ctx)
    }
}

/// Drives `config.frames` frames against the process-wide clock.
///
/// A clock torn down by the simulated context reset is recreated and the
/// driver rebound. The clock is torn down on return.
pub fn run_session(config: &HostConfig, source: Arc<dyn ClockSource>) -> Result<Vec<FrameReport>> {
    let clock_config = PhaseClockConfig {
        persist_across_context_reset: config.persist,
    };

    let registration = timesync_core::create(clock_config, source.clone());
    if !registration.is_installed() {
        log::warn!(
            "reusing already-live phase clock #{}",
            registration.clock().id()
        );
    }

    let mut driver = FrameDriver::from_global().context("phase clock missing after create")?;
    let mut hooks = StampLogger::default();
    let mut reports = Vec::new();

    for frame in 0..config.frames {
        if config.reset_at == Some(frame) {
            match timesync_core::context_reset() {
                ResetOutcome::TornDown => {
                    let clock = timesync_core::create(clock_config, source.clone()).into_clock();
                    driver.rebind(clock);
                }
                outcome => log::info!("context reset at frame {frame}: {outcome:?}"),
            }
        }

        let report = driver.run_frame(&mut hooks);
        let stop = report.control == HookControl::Exit;
        reports.push(report);
        if stop {
            break;
        }
    }

    if hooks.backward_jumps > 0 {
        log::warn!("{} backward clock readings observed", hooks.backward_jumps);
    }

    timesync_core::teardown();
    Ok(reports)
}
