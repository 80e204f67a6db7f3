use std::fmt;

/// Per-frame callback point that gets its own timestamp.
///
/// Variants are declared in host order: a frame runs every physics step
/// first, then the normal update, then the late update.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Phase {
    PhysicsStep,
    Update,
    LateUpdate,
}

impl Phase {
    /// Number of phases; also the number of timestamp slots.
    pub const COUNT: usize = 3;

    /// All phases in the order the host invokes them.
    pub const ALL: [Phase; Self::COUNT] = [Phase::PhysicsStep, Phase::Update, Phase::LateUpdate];

    /// Dense slot index in `0..COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Phase::PhysicsStep => 0,
            Phase::Update => 1,
            Phase::LateUpdate => 2,
        }
    }

    /// Stable identifier used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Phase::PhysicsStep => "physics_step",
            Phase::Update => "update",
            Phase::LateUpdate => "late_update",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_host_order() {
        assert_eq!(Phase::ALL, [Phase::PhysicsStep, Phase::Update, Phase::LateUpdate]);
        assert!(Phase::PhysicsStep < Phase::Update);
        assert!(Phase::Update < Phase::LateUpdate);
    }

    #[test]
    fn indices_are_dense() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Phase::PhysicsStep.to_string(), "physics_step");
        assert_eq!(Phase::LateUpdate.to_string(), Phase::LateUpdate.name());
    }
}
