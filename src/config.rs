//! Configuration for observation, navigation, probing and reward shaping.
//!
//! Defaults reproduce the reference agent's constants. With the `serde`
//! feature every section deserializes from a partial document, falling back
//! to these defaults for missing fields.

use crate::error::CoreError;

/// Top-level configuration for an arena agent.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ArenaConfig {
    pub rewards: RewardConfig,
    pub speed_incentive: SpeedIncentiveConfig,
    pub navigation: NavigationConfig,
    pub probe: ProbeConfig,
}

impl ArenaConfig {
    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.rewards.validate()?;
        self.speed_incentive.validate()?;
        self.navigation.validate()?;
        self.probe.validate()
    }
}

fn require_finite(name: &str, value: f32) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidConfig(format!("{name} must be finite")))
    }
}

fn require_positive(name: &str, value: f32) -> Result<(), CoreError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidConfig(format!("{name} must be positive")))
    }
}

/// Per-event reward deltas.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RewardConfig {
    /// Added on the tick the agent becomes frozen.
    pub frozen_penalty: f32,
    /// Added on every tick the targeting effect fires.
    pub effect_use_penalty: f32,
    /// Added when the probe hits an opposing agent.
    pub effect_hit_reward: f32,
    /// Added when the probe is active but hits no opponent.
    pub effect_miss_penalty: f32,
    /// Added when the agent touches a target it may pick up.
    pub pickup_reward: f32,
    /// Flat part of the own-base contact reward.
    pub delivery_base_reward: f32,
    /// Own-base contact reward per carried target.
    pub delivery_per_carried_reward: f32,
    pub wall_collision_penalty: f32,
    pub opponent_collision_penalty: f32,
}

impl RewardConfig {
    fn validate(&self) -> Result<(), CoreError> {
        require_finite("rewards.frozen_penalty", self.frozen_penalty)?;
        require_finite("rewards.effect_use_penalty", self.effect_use_penalty)?;
        require_finite("rewards.effect_hit_reward", self.effect_hit_reward)?;
        require_finite("rewards.effect_miss_penalty", self.effect_miss_penalty)?;
        require_finite("rewards.pickup_reward", self.pickup_reward)?;
        require_finite("rewards.delivery_base_reward", self.delivery_base_reward)?;
        require_finite(
            "rewards.delivery_per_carried_reward",
            self.delivery_per_carried_reward,
        )?;
        require_finite("rewards.wall_collision_penalty", self.wall_collision_penalty)?;
        require_finite(
            "rewards.opponent_collision_penalty",
            self.opponent_collision_penalty,
        )
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            frozen_penalty: -0.5,
            effect_use_penalty: -0.02,
            effect_hit_reward: 0.5,
            effect_miss_penalty: -0.05,
            pickup_reward: 0.2,
            delivery_base_reward: 0.8,
            delivery_per_carried_reward: 1.0,
            wall_collision_penalty: -0.75,
            opponent_collision_penalty: -0.2,
        }
    }
}

/// Speed-keeping incentive. Disabled by default.
///
/// ```text
/// optimal    = base_optimal_speed - optimal_speed_drop_per_carried × carried
/// efficiency = speed / optimal
/// pace       = speed_reward_multiplier × (1 - efficiency)  if efficiency ≥ threshold
///            = slow_penalty_multiplier × (1 - efficiency)  otherwise
///            = 0                                           if optimal = 0
/// reward     = pace + carry_penalty_multiplier × carried
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SpeedIncentiveConfig {
    pub enabled: bool,
    pub base_optimal_speed: f32,
    pub optimal_speed_drop_per_carried: f32,
    pub efficiency_threshold: f32,
    pub speed_reward_multiplier: f32,
    pub slow_penalty_multiplier: f32,
    pub carry_penalty_multiplier: f32,
}

impl SpeedIncentiveConfig {
    fn validate(&self) -> Result<(), CoreError> {
        require_positive(
            "speed_incentive.base_optimal_speed",
            self.base_optimal_speed,
        )?;
        require_finite(
            "speed_incentive.optimal_speed_drop_per_carried",
            self.optimal_speed_drop_per_carried,
        )?;
        require_finite(
            "speed_incentive.efficiency_threshold",
            self.efficiency_threshold,
        )?;
        require_finite(
            "speed_incentive.speed_reward_multiplier",
            self.speed_reward_multiplier,
        )?;
        require_finite(
            "speed_incentive.slow_penalty_multiplier",
            self.slow_penalty_multiplier,
        )?;
        require_finite(
            "speed_incentive.carry_penalty_multiplier",
            self.carry_penalty_multiplier,
        )
    }
}

impl Default for SpeedIncentiveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_optimal_speed: 1.5,
            optimal_speed_drop_per_carried: 0.05,
            efficiency_threshold: 0.8,
            speed_reward_multiplier: 0.01,
            slow_penalty_multiplier: -0.02,
            carry_penalty_multiplier: -0.02,
        }
    }
}

/// Nearest-target scan and steering parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct NavigationConfig {
    /// Targets at or beyond this distance are never selected.
    pub scan_cutoff: f32,
    /// Half-width of the "straight ahead" band, in degrees.
    pub deadband_degrees: f32,
}

impl NavigationConfig {
    fn validate(&self) -> Result<(), CoreError> {
        require_positive("navigation.scan_cutoff", self.scan_cutoff)?;
        require_finite("navigation.deadband_degrees", self.deadband_degrees)?;
        if !(0.0..180.0).contains(&self.deadband_degrees) {
            return Err(CoreError::InvalidConfig(
                "navigation.deadband_degrees must lie in [0, 180)".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scan_cutoff: 200.0,
            deadband_degrees: 5.0,
        }
    }
}

/// Geometry of the forward sweep performed by the host for the targeting effect.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ProbeConfig {
    pub radius: f32,
    pub range: f32,
}

impl ProbeConfig {
    fn validate(&self) -> Result<(), CoreError> {
        require_positive("probe.radius", self.radius)?;
        require_positive("probe.range", self.range)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            radius: 0.25,
            range: 20.0,
        }
    }
}
