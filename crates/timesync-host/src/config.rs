use anyhow::{Context, Result};

/// Reference host configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Frames to drive before exiting.
    pub frames: u64,

    /// Passed through to `PhaseClockConfig::persist_across_context_reset`.
    pub persist: bool,

    /// Frame index at which to simulate a context reset.
    pub reset_at: Option<u64>,

    /// Logger filter; falls back to `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frames: 3,
            persist: false,
            reset_at: None,
            log_filter: None,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("TIMESYNC_FRAMES") {
            config.frames = v
                .trim()
                .parse()
                .with_context(|| format!("TIMESYNC_FRAMES must be a frame count, got {v:?}"))?;
        }

        if let Some(v) = lookup("TIMESYNC_PERSIST") {
            config.persist = parse_bool(&v)
                .with_context(|| format!("TIMESYNC_PERSIST must be a boolean, got {v:?}"))?;
        }

        if let Some(v) = lookup("TIMESYNC_RESET_AT") {
            let frame = v
                .trim()
                .parse()
                .with_context(|| format!("TIMESYNC_RESET_AT must be a frame index, got {v:?}"))?;
            config.reset_at = Some(frame);
        }

        config.log_filter = lookup("TIMESYNC_LOG").filter(|v| !v.trim().is_empty());

        Ok(config)
    }
}

fn parse_bool(v: &str) -> Result<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized boolean {other:?}"),
    }
}
