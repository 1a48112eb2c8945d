//! Random policy for testing and baselines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::Policy;
use crate::action::ActionSelection;

/// Samples every action slot uniformly from its valid range.
///
/// Seeded so that runs are reproducible. Used for sanity checks and as a
/// lower-bound baseline.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a new random policy from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _observation: &[f32]) -> ActionSelection {
        let mut slots = [0; ActionSelection::SLOTS];
        for (slot, &size) in slots.iter_mut().zip(ActionSelection::BRANCH_SIZES.iter()) {
            *slot = self.rng.gen_range(0..size);
        }
        ActionSelection::from_slots(slots)
    }

    fn name(&self) -> &str {
        "random"
    }
}
