/// Construction-time options for a `PhaseClock`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PhaseClockConfig {
    /// Keep the clock alive across a host context reset.
    ///
    /// When `false`, `context_reset` tears the clock down and the host is
    /// expected to create a new one.
    pub persist_across_context_reset: bool,
}

impl PhaseClockConfig {
    /// Config for a clock that lives for the whole process.
    pub fn persistent() -> Self {
        Self {
            persist_across_context_reset: true,
        }
    }
}
