//! Frozen-state edge detection.

/// Remembers last tick's frozen flag to detect the moment an agent freezes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrozenTracker {
    previous: bool,
}

impl FrozenTracker {
    /// Creates a tracker seeded with the agent's frozen flag at episode start.
    pub fn new(initially_frozen: bool) -> Self {
        Self {
            previous: initially_frozen,
        }
    }

    /// Records this tick's flag. Returns true only on a false→true edge.
    pub fn observe(&mut self, frozen: bool) -> bool {
        let entered = !self.previous && frozen;
        self.previous = frozen;
        entered
    }

    pub fn was_frozen(&self) -> bool {
        self.previous
    }

    pub fn reset(&mut self, frozen: bool) {
        self.previous = frozen;
    }
}
