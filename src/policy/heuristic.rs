//! Scripted collect-and-return baseline.

use log::warn;

use super::trait_::Policy;
use crate::action::ActionSelection;
use crate::observation::{observation_dim, ObservationEncoder};
use crate::world::TeamId;

/// Heads for the nearest target while any is up for grabs, otherwise home.
///
/// Reads only the observation: a target block is considered available when
/// its carried-by indicator is zero and its in-base indicator is not this
/// policy's team. Frozen agents idle. The targeting effect is never used.
pub struct GreedyCollectPolicy {
    team: TeamId,
    target_count: usize,
}

impl GreedyCollectPolicy {
    /// Creates a greedy policy for `team` in an arena with `target_count` targets.
    pub fn new(team: TeamId, target_count: usize) -> Self {
        Self { team, target_count }
    }

    fn any_target_available(&self, observation: &[f32]) -> bool {
        let own_base = self.team.indicator();
        (0..self.target_count).any(|i| {
            let block = ObservationEncoder::target_offset(i);
            let carried = observation[block + 4];
            let in_base = observation[block + 5];
            carried == 0.0 && in_base != own_base
        })
    }
}

impl Policy for GreedyCollectPolicy {
    fn select_action(&mut self, observation: &[f32]) -> ActionSelection {
        if observation.len() != observation_dim(self.target_count) {
            warn!(
                "Observation of length {} does not fit {} targets; idling",
                observation.len(),
                self.target_count
            );
            return ActionSelection::idle();
        }

        let frozen = observation[observation.len() - 1] > 0.5;
        if frozen {
            return ActionSelection::idle();
        }

        if self.any_target_available(observation) {
            ActionSelection {
                go_to_target: 1,
                ..ActionSelection::idle()
            }
        } else {
            ActionSelection {
                go_to_base: 1,
                ..ActionSelection::idle()
            }
        }
    }

    fn name(&self) -> &str {
        "greedy_collect"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(blocks: &[(f32, f32)], frozen: bool) -> Vec<f32> {
        let mut obs = vec![0.0; ObservationEncoder::HEADER_DIM];
        for &(carried, in_base) in blocks {
            obs.extend([0.0, 0.0, 1.0, 5.0, carried, in_base]);
        }
        obs.push(if frozen { 1.0 } else { 0.0 });
        obs
    }

    #[test]
    fn goes_for_free_target() {
        let mut policy = GreedyCollectPolicy::new(TeamId(1), 2);
        let action = policy.select_action(&observation(&[(2.0, 0.0), (0.0, 0.0)], false));
        assert_eq!(action.go_to_target, 1);
        assert_eq!(action.go_to_base, 0);
    }

    #[test]
    fn steals_from_enemy_base() {
        let mut policy = GreedyCollectPolicy::new(TeamId(1), 1);
        let action = policy.select_action(&observation(&[(0.0, 2.0)], false));
        assert_eq!(action.go_to_target, 1);
    }

    #[test]
    fn returns_home_when_nothing_left() {
        let mut policy = GreedyCollectPolicy::new(TeamId(1), 2);
        let action = policy.select_action(&observation(&[(1.0, 0.0), (0.0, 1.0)], false));
        assert_eq!(action.go_to_base, 1);
        assert_eq!(action.go_to_target, 0);
    }

    #[test]
    fn idles_while_frozen() {
        let mut policy = GreedyCollectPolicy::new(TeamId(1), 1);
        let action = policy.select_action(&observation(&[(0.0, 0.0)], true));
        assert_eq!(action, ActionSelection::idle());
    }

    #[test]
    fn idles_on_malformed_observation() {
        let mut policy = GreedyCollectPolicy::new(TeamId(1), 3);
        assert_eq!(policy.select_action(&[0.0; 4]), ActionSelection::idle());
    }
}
