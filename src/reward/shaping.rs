//! Reward shaping.
//!
//! Each reward event maps to a configured delta; all rules are independent
//! and additive. The optional speed incentive is added on top when enabled.

use super::events::RewardEvent;
use super::ledger::RewardBreakdown;
use crate::config::{RewardConfig, SpeedIncentiveConfig};

/// Computes per-tick rewards from events, carried count and speed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RewardShaper {
    rewards: RewardConfig,
    speed: SpeedIncentiveConfig,
}

impl RewardShaper {
    /// Creates a shaper from reward and speed-incentive settings.
    pub fn new(rewards: RewardConfig, speed: SpeedIncentiveConfig) -> Self {
        Self { rewards, speed }
    }

    /// Delta for a single event.
    ///
    /// Base delivery scales with `carried`: `base + per_carried × carried`.
    pub fn event_reward(&self, event: RewardEvent, carried: u32) -> f32 {
        let r = &self.rewards;
        match event {
            RewardEvent::EnteredFrozen => r.frozen_penalty,
            RewardEvent::EffectUsed => r.effect_use_penalty,
            RewardEvent::EffectHit => r.effect_hit_reward,
            RewardEvent::EffectMiss => r.effect_miss_penalty,
            RewardEvent::TargetPickup => r.pickup_reward,
            RewardEvent::BaseDelivery => {
                r.delivery_base_reward + r.delivery_per_carried_reward * carried as f32
            }
            RewardEvent::WallCollision => r.wall_collision_penalty,
            RewardEvent::OpponentCollision => r.opponent_collision_penalty,
        }
    }

    /// Speed-keeping term; zero while the incentive is disabled.
    ///
    /// # Arguments
    ///
    /// * `speed` - Current ground speed of the agent
    /// * `carried` - Targets carried this tick
    ///
    /// Loads heavy enough to push the optimal speed below zero keep the
    /// negative optimum. When the optimum is zero the pace term is skipped
    /// and only the carry term applies.
    pub fn speed_incentive(&self, speed: f32, carried: u32) -> f32 {
        let s = &self.speed;
        if !s.enabled {
            return 0.0;
        }

        let carried = carried as f32;
        let optimal = s.base_optimal_speed - s.optimal_speed_drop_per_carried * carried;
        let carry = s.carry_penalty_multiplier * carried;
        if optimal.abs() < f32::EPSILON {
            return carry;
        }

        let efficiency = speed / optimal;
        let pace = if efficiency >= s.efficiency_threshold {
            s.speed_reward_multiplier * (1.0 - efficiency)
        } else {
            s.slow_penalty_multiplier * (1.0 - efficiency)
        };

        pace + carry
    }

    /// Shapes one tick into a per-category breakdown.
    ///
    /// The breakdown's total is independent of the order of `events`.
    ///
    /// # Arguments
    ///
    /// * `events` - Reward events classified for this tick
    /// * `carried` - Targets carried at the start of the tick
    /// * `speed` - Ground speed, used only by the speed incentive
    pub fn shape(&self, events: &[RewardEvent], carried: u32, speed: f32) -> RewardBreakdown {
        let mut breakdown = RewardBreakdown::default();
        for &event in events {
            breakdown.add_event(event, self.event_reward(event, carried));
        }
        breakdown.speed_incentive = self.speed_incentive(speed, carried);
        breakdown
    }

    /// `previous` plus this tick's shaped reward.
    pub fn accumulate(
        &self,
        previous: f32,
        events: &[RewardEvent],
        carried: u32,
        speed: f32,
    ) -> f32 {
        previous + self.shape(events, carried, speed).total()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const EPS: f32 = 1e-6;

    #[rstest]
    #[case(RewardEvent::EnteredFrozen, -0.5)]
    #[case(RewardEvent::EffectUsed, -0.02)]
    #[case(RewardEvent::EffectHit, 0.5)]
    #[case(RewardEvent::EffectMiss, -0.05)]
    #[case(RewardEvent::TargetPickup, 0.2)]
    #[case(RewardEvent::BaseDelivery, 0.8)]
    #[case(RewardEvent::WallCollision, -0.75)]
    #[case(RewardEvent::OpponentCollision, -0.2)]
    fn default_deltas(#[case] event: RewardEvent, #[case] expected: f32) {
        let shaper = RewardShaper::default();
        assert!((shaper.event_reward(event, 0) - expected).abs() < EPS);
    }

    #[test]
    fn pickup_scenario_adds_exactly_point_two() {
        let shaper = RewardShaper::default();
        let total = shaper.accumulate(0.0, &[RewardEvent::TargetPickup], 0, 0.0);
        assert_eq!(total, 0.2);
    }

    #[test]
    fn delivery_scales_with_carried() {
        let shaper = RewardShaper::default();
        let total = shaper.accumulate(0.0, &[RewardEvent::BaseDelivery], 2, 0.0);
        assert!((total - 2.8).abs() < EPS);
    }

    #[test]
    fn all_rules_fire_together() {
        let shaper = RewardShaper::default();
        let events = RewardEvent::all();
        let expected = -0.5 - 0.02 + 0.5 - 0.05 + 0.2 + (0.8 + 1.0) - 0.75 - 0.2;
        let total = shaper.shape(&events, 1, 0.0).total();
        assert!((total - expected).abs() < 1e-5);
    }

    #[test]
    fn order_of_events_does_not_matter() {
        let shaper = RewardShaper::default();
        let forward = [
            RewardEvent::EffectUsed,
            RewardEvent::WallCollision,
            RewardEvent::TargetPickup,
            RewardEvent::BaseDelivery,
            RewardEvent::EffectMiss,
            RewardEvent::EnteredFrozen,
        ];
        let mut reversed = forward;
        reversed.reverse();
        let mut rotated = forward;
        rotated.rotate_left(2);

        let a = shaper.shape(&forward, 3, 0.0).total();
        let b = shaper.shape(&reversed, 3, 0.0).total();
        let c = shaper.shape(&rotated, 3, 0.0).total();
        assert_eq!(a.to_bits(), b.to_bits());
        assert_eq!(a.to_bits(), c.to_bits());
    }

    #[test]
    fn speed_incentive_off_by_default() {
        let shaper = RewardShaper::default();
        assert_eq!(shaper.speed_incentive(1.4, 2), 0.0);
        assert_eq!(shaper.shape(&[], 2, 1.4).total(), 0.0);
    }

    fn speedy() -> RewardShaper {
        RewardShaper::new(
            RewardConfig::default(),
            SpeedIncentiveConfig {
                enabled: true,
                ..SpeedIncentiveConfig::default()
            },
        )
    }

    #[test]
    fn speed_incentive_fast_branch() {
        // carried 0: optimal 1.5, efficiency 1.2 ≥ 0.8
        let r = speedy().speed_incentive(1.8, 0);
        assert!((r - 0.01 * (1.0 - 1.2)).abs() < EPS);
    }

    #[test]
    fn speed_incentive_slow_branch_with_carry() {
        // carried 2: optimal 1.4, speed 0.7 → efficiency 0.5 < 0.8
        let r = speedy().speed_incentive(0.7, 2);
        let expected = -0.02 * (1.0 - 0.5) + -0.02 * 2.0;
        assert!((r - expected).abs() < EPS);
    }

    #[test]
    fn speed_incentive_threshold_takes_fast_branch() {
        let shaper = RewardShaper::new(
            RewardConfig::default(),
            SpeedIncentiveConfig {
                enabled: true,
                base_optimal_speed: 1.0,
                efficiency_threshold: 0.5,
                ..SpeedIncentiveConfig::default()
            },
        );
        // efficiency exactly 0.5
        let r = shaper.speed_incentive(0.5, 0);
        assert!((r - 0.01 * 0.5).abs() < EPS);
    }

    #[test]
    fn speed_incentive_zero_optimum_keeps_carry_term() {
        // carried 30: optimal 1.5 - 1.5 = 0
        let r = speedy().speed_incentive(1.0, 30);
        assert!((r - (-0.02 * 30.0)).abs() < 1e-5);
    }

    #[test]
    fn speed_incentive_negative_optimum_follows_formula() {
        // carried 31: optimal -0.05, efficiency -20 → slow branch
        let r = speedy().speed_incentive(1.0, 31);
        let expected = -0.02 * (1.0 + 20.0) + -0.02 * 31.0;
        assert!((r - expected).abs() < 1e-4);
        assert!((r - (-1.04)).abs() < 1e-4);
    }

    #[test]
    fn accumulate_builds_on_previous_total() {
        let shaper = RewardShaper::default();
        let total = shaper.accumulate(1.25, &[RewardEvent::TargetPickup], 0, 0.0);
        assert!((total - 1.45).abs() < EPS);
        let total = shaper.accumulate(total, &[RewardEvent::WallCollision], 0, 0.0);
        assert!((total - 0.7).abs() < EPS);
    }
}
