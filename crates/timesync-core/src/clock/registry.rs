use std::sync::Arc;

use parking_lot::{const_rwlock, RwLock};

use crate::time::ClockSource;

use super::config::PhaseClockConfig;
use super::error::TimeSyncError;
use super::phase_clock::PhaseClock;

/// Result of a construction attempt.
#[derive(Debug, Clone)]
pub enum Registration {
    /// The new clock is now the live one.
    Installed(Arc<PhaseClock>),
    /// A clock was already live; the new one was dropped.
    Discarded { existing: Arc<PhaseClock> },
}

impl Registration {
    /// The clock that is authoritative after the attempt.
    pub fn clock(&self) -> &Arc<PhaseClock> {
        match self {
            Registration::Installed(clock) => clock,
            Registration::Discarded { existing } => existing,
        }
    }

    pub fn into_clock(self) -> Arc<PhaseClock> {
        match self {
            Registration::Installed(clock) => clock,
            Registration::Discarded { existing } => existing,
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self, Registration::Installed(_))
    }
}

/// What a context reset did to the live clock.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResetOutcome {
    /// No clock was live.
    Empty,
    /// The live clock is persistent and survived.
    Persisted,
    /// The live clock was torn down; the slot is free again.
    TornDown,
}

/// Single-slot holder for the authoritative `PhaseClock`.
///
/// Construction is first-writer-wins: the check and the install happen under
/// one write lock, so two racing `create` calls can never both succeed.
/// Readers only take the read lock.
pub struct Registry {
    slot: RwLock<Option<Arc<PhaseClock>>>,
}

impl Registry {
    pub const fn new() -> Self {
        Self {
            slot: const_rwlock(None),
        }
    }

    /// Installs a new clock unless one is already live.
    pub fn create(&self, config: PhaseClockConfig, source: Arc<dyn ClockSource>) -> Registration {
        let mut slot = self.slot.write();

        if let Some(existing) = slot.as_ref() {
            log::debug!(
                "phase clock #{} already live; discarding new construction",
                existing.id()
            );
            return Registration::Discarded {
                existing: existing.clone(),
            };
        }

        let clock = Arc::new(PhaseClock::new(config, source));
        log::debug!(
            "phase clock #{} installed (persist_across_context_reset={})",
            clock.id(),
            config.persist_across_context_reset
        );
        *slot = Some(clock.clone());
        Registration::Installed(clock)
    }

    /// The live clock, if any.
    ///
    /// `None` means "timestamps unavailable". Do not substitute zero.
    pub fn instance(&self) -> Option<Arc<PhaseClock>> {
        self.slot.read().clone()
    }

    /// Like `instance`, but as a `Result`.
    pub fn require(&self) -> Result<Arc<PhaseClock>, TimeSyncError> {
        self.instance().ok_or(TimeSyncError::Uninitialized)
    }

    /// Applies the host's context-reset policy to the live clock.
    pub fn context_reset(&self) -> ResetOutcome {
        let mut slot = self.slot.write();

        let Some(clock) = slot.as_ref() else {
            return ResetOutcome::Empty;
        };

        if clock.config().persist_across_context_reset {
            log::debug!("phase clock #{} persists across context reset", clock.id());
            return ResetOutcome::Persisted;
        }

        clock.retire();
        log::info!("phase clock #{} torn down by context reset", clock.id());
        *slot = None;
        ResetOutcome::TornDown
    }

    /// Tears down the live clock regardless of its persist flag.
    ///
    /// Returns `false` if no clock was live.
    pub fn teardown(&self) -> bool {
        let Some(clock) = self.slot.write().take() else {
            return false;
        };

        clock.retire();
        log::info!("phase clock #{} torn down", clock.id());
        true
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: Registry = Registry::new();

/// Installs the process-wide clock unless one is already live.
pub fn create(config: PhaseClockConfig, source: Arc<dyn ClockSource>) -> Registration {
    GLOBAL.create(config, source)
}

/// The process-wide clock, if any.
pub fn instance() -> Option<Arc<PhaseClock>> {
    GLOBAL.instance()
}

/// The process-wide clock, or `TimeSyncError::Uninitialized`.
pub fn require() -> Result<Arc<PhaseClock>, TimeSyncError> {
    GLOBAL.require()
}

/// Context reset for the process-wide clock.
pub fn context_reset() -> ResetOutcome {
    GLOBAL.context_reset()
}

/// Explicit teardown of the process-wide clock.
pub fn teardown() -> bool {
    GLOBAL.teardown()
}
