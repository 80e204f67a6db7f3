mod config;
mod session;

use std::sync::Arc;

use anyhow::{Context, Result};

use timesync_core::logging::{init_logging, LoggingConfig};
use timesync_core::MonotonicClock;

use config::HostConfig;

fn main() -> Result<()> {
    let config = HostConfig::from_env().context("invalid host configuration")?;

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });
    MonotonicClock::init();

    log::info!(
        "driving {} frame(s), persist={}, reset_at={:?}",
        config.frames,
        config.persist,
        config.reset_at
    );

    let reports = session::run_session(&config, Arc::new(MonotonicClock))?;

    println!();
    println!("  frame   physics_step        update   late_update");
    println!("  ─────   ────────────   ───────────   ───────────");
    for r in &reports {
        println!(
            "  {:>5}   {:>12.6}   {:>11.6}   {:>11.6}",
            r.frame_index, r.stamps.physics_step, r.stamps.update, r.stamps.late_update
        );
    }
    println!();

    Ok(())
}
