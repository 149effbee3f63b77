//! How LevelUp moves an avatar's level.

/// Computes the next level from the current one.
///
/// Returning `None` means the move is out of range; the instruction then
/// fails with `Overflow` and nothing is written.
pub trait LevelStrategy: Send + Sync {
    fn next_level(&self, current: i64) -> Option<i64>;
}

/// Add a constant step on every LevelUp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStep(i64);

impl FixedStep {
    /// One level per LevelUp.
    pub const ONE: FixedStep = FixedStep(1);

    /// A step of `step` levels. `step` must be at least 1.
    pub fn new(step: i64) -> Option<Self> {
        (step >= 1).then_some(Self(step))
    }

    pub fn step(&self) -> i64 {
        self.0
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::ONE
    }
}

impl LevelStrategy for FixedStep {
    fn next_level(&self, current: i64) -> Option<i64> {
        current.checked_add(self.0)
    }
}

impl<F> LevelStrategy for F
where
    F: Fn(i64) -> Option<i64> + Send + Sync,
{
    fn next_level(&self, current: i64) -> Option<i64> {
        self(current)
    }
}
