//! Policy trait for arena agents.

use crate::action::ActionSelection;

/// A policy that maps one agent's observation to a discrete action.
///
/// Observations follow the layout produced by
/// [`ObservationEncoder`](crate::observation::ObservationEncoder).
pub trait Policy: Send + Sync {
    /// Selects this tick's action for one agent.
    fn select_action(&mut self, observation: &[f32]) -> ActionSelection;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
