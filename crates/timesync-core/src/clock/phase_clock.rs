use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::time::{ClockSource, Phase};

use super::config::PhaseClockConfig;

/// Value read from a slot that was never marked.
pub const SENTINEL: f64 = 0.0;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Readings of all three phases at one point in time.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PhaseStamps {
    pub physics_step: f64,
    pub update: f64,
    pub late_update: f64,
}

impl PhaseStamps {
    /// Reading for `phase`.
    pub fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::PhysicsStep => self.physics_step,
            Phase::Update => self.update,
            Phase::LateUpdate => self.late_update,
        }
    }
}

/// Per-phase timestamp cache.
///
/// Each slot has one logical writer (the host, through `mark`) and any number
/// of readers. Slots hold the `f64` bit pattern in an `AtomicU64`, so a read
/// never observes a torn value even when phases are driven from different
/// threads. There is no ordering between slots.
///
/// Once torn down a clock is inert: marks are ignored and every read returns
/// `SENTINEL`.
pub struct PhaseClock {
    id: u64,
    config: PhaseClockConfig,
    source: Arc<dyn ClockSource>,
    slots: [AtomicU64; Phase::COUNT],
    marked: [AtomicBool; Phase::COUNT],
    live: AtomicBool,
}

impl PhaseClock {
    /// Creates a clock that is not registered anywhere.
    ///
    /// Use `clock::create` to install the process-wide one.
    pub fn new(config: PhaseClockConfig, source: Arc<dyn ClockSource>) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            config,
            source,
            slots: [const { AtomicU64::new(0) }; Phase::COUNT],
            marked: [const { AtomicBool::new(false) }; Phase::COUNT],
            live: AtomicBool::new(true),
        }
    }

    /// Stamps `phase` with the current clock reading.
    ///
    /// The previous value is overwritten. Readings are stored as given; a clock
    /// that jumps backward produces a smaller stamp.
    #[inline]
    pub fn mark(&self, phase: Phase) {
        if !self.is_live() {
            log::trace!("phase clock #{} is torn down; ignoring mark({phase})", self.id);
            return;
        }

        let reading = self.source.now();
        let i = phase.index();
        self.slots[i].store(reading.to_bits(), Ordering::Release);
        self.marked[i].store(true, Ordering::Release);
    }

    /// Last reading stored for `phase`, or `SENTINEL` if there is none.
    #[inline]
    pub fn get(&self, phase: Phase) -> f64 {
        self.sample(phase).unwrap_or(SENTINEL)
    }

    /// Last reading stored for `phase`.
    ///
    /// `None` if `phase` was never marked or the clock was torn down. Prefer
    /// this over `get` when a real reading of `0.0` must be told apart from
    /// "no reading".
    pub fn sample(&self, phase: Phase) -> Option<f64> {
        if !self.is_live() {
            return None;
        }

        let i = phase.index();
        if !self.marked[i].load(Ordering::Acquire) {
            return None;
        }
        Some(f64::from_bits(self.slots[i].load(Ordering::Acquire)))
    }

    /// Snapshot of all slots. Slots are read independently.
    pub fn stamps(&self) -> PhaseStamps {
        PhaseStamps {
            physics_step: self.get(Phase::PhysicsStep),
            update: self.get(Phase::Update),
            late_update: self.get(Phase::LateUpdate),
        }
    }

    pub fn physics_step(&self) -> f64 {
        self.get(Phase::PhysicsStep)
    }

    pub fn update(&self) -> f64 {
        self.get(Phase::Update)
    }

    pub fn late_update(&self) -> f64 {
        self.get(Phase::LateUpdate)
    }

    pub fn config(&self) -> PhaseClockConfig {
        self.config
    }

    /// Process-unique id, for diagnostics.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// `false` once the clock has been torn down.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Retires the clock. Returns `false` if it was already retired.
    pub(crate) fn retire(&self) -> bool {
        self.live.swap(false, Ordering::AcqRel)
    }
}

impl fmt::Debug for PhaseClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseClock")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("live", &self.is_live())
            .field("stamps", &self.stamps())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    fn clock_with(readings: &[f64]) -> (PhaseClock, Arc<ManualClock>) {
        let source = Arc::new(ManualClock::with_readings(readings.iter().copied()));
        let clock = PhaseClock::new(PhaseClockConfig::default(), source.clone());
        (clock, source)
    }

    // ── sentinel ──────────────────────────────────────────────────────────

    #[test]
    fn fresh_clock_reads_sentinel_everywhere() {
        let (clock, _) = clock_with(&[]);
        for phase in Phase::ALL {
            assert_eq!(clock.get(phase), SENTINEL);
            assert_eq!(clock.sample(phase), None);
        }
        assert_eq!(clock.stamps(), PhaseStamps::default());
    }

    // ── mark / get ────────────────────────────────────────────────────────

    #[test]
    fn frame_scenario_stamps_each_phase_in_order() {
        let (clock, _) = clock_with(&[1.0, 1.001, 1.002]);
        clock.mark(Phase::PhysicsStep);
        clock.mark(Phase::Update);
        clock.mark(Phase::LateUpdate);

        assert_eq!(clock.physics_step(), 1.0);
        assert_eq!(clock.update(), 1.001);
        assert_eq!(clock.late_update(), 1.002);
    }

    #[test]
    fn last_write_wins() {
        let (clock, _) = clock_with(&[2.0, 3.5]);
        clock.mark(Phase::Update);
        assert_eq!(clock.get(Phase::Update), 2.0);
        clock.mark(Phase::Update);
        assert_eq!(clock.get(Phase::Update), 3.5);
    }

    #[test]
    fn mark_leaves_other_phases_alone() {
        let (clock, source) = clock_with(&[1.0, 2.0]);
        clock.mark(Phase::PhysicsStep);
        clock.mark(Phase::LateUpdate);

        source.push(9.0);
        clock.mark(Phase::Update);

        assert_eq!(clock.get(Phase::PhysicsStep), 1.0);
        assert_eq!(clock.get(Phase::LateUpdate), 2.0);
        assert_eq!(clock.get(Phase::Update), 9.0);
    }

    #[test]
    fn backward_reading_is_stored_as_is() {
        let (clock, _) = clock_with(&[5.0, 4.0]);
        clock.mark(Phase::PhysicsStep);
        clock.mark(Phase::PhysicsStep);
        assert_eq!(clock.get(Phase::PhysicsStep), 4.0);
    }

    #[test]
    fn zero_reading_is_distinguishable_through_sample() {
        let (clock, source) = clock_with(&[]);
        source.set(0.0);
        clock.mark(Phase::Update);
        assert_eq!(clock.sample(Phase::Update), Some(0.0));
        assert_eq!(clock.sample(Phase::LateUpdate), None);
    }

    // ── retire ────────────────────────────────────────────────────────────

    #[test]
    fn retired_clock_reads_sentinel_and_ignores_marks() {
        let (clock, source) = clock_with(&[1.0]);
        clock.mark(Phase::Update);
        assert!(clock.retire());
        assert!(!clock.retire());

        assert_eq!(clock.get(Phase::Update), SENTINEL);
        assert_eq!(clock.sample(Phase::Update), None);

        source.set(7.0);
        clock.mark(Phase::Update);
        assert_eq!(clock.get(Phase::Update), SENTINEL);
    }

    #[test]
    fn ids_are_unique() {
        let (a, _) = clock_with(&[]);
        let (b, _) = clock_with(&[]);
        assert_ne!(a.id(), b.id());
    }

    // ── threads ───────────────────────────────────────────────────────────

    #[test]
    fn readers_on_other_threads_see_whole_readings() {
        let source = Arc::new(ManualClock::new(0.5));
        let clock = Arc::new(PhaseClock::new(PhaseClockConfig::default(), source.clone()));

        let writer = {
            let clock = clock.clone();
            let source = source.clone();
            std::thread::spawn(move || {
                for i in 1..=1_000 {
                    source.set(i as f64 * 0.5);
                    clock.mark(Phase::PhysicsStep);
                }
            })
        };

        for _ in 0..1_000 {
            let v = clock.get(Phase::PhysicsStep);
            // Every stored value is a multiple of 0.5; a torn read would not be.
            assert_eq!((v * 2.0).fract(), 0.0);
        }

        writer.join().unwrap();
        assert_eq!(clock.get(Phase::PhysicsStep), 500.0);
    }
}
