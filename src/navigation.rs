//! Single-target steering heuristic.
//!
//! A dead-band bang-bang controller: each call either turns toward the goal
//! or drives forward, never both.

use glam::Vec3;

use crate::config::NavigationConfig;
use crate::world::{Pose, TargetDescriptor, TeamId, WorldSnapshot};

/// Outcome of one steering decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteeringCommand {
    /// Turn toward positive yaw (to the agent's right).
    RotatePositive,
    /// Turn toward negative yaw (to the agent's left).
    RotateNegative,
    /// Goal is within the dead band: drive straight ahead.
    MoveForward,
}

/// Signed ground-plane angle, in degrees, from the direction toward `target`
/// to the pose's forward axis, measured about +Y.
///
/// The result lies in `(-180, 180]`. Goals on the agent's right give
/// negative angles, goals on its left positive ones. A goal at the agent's
/// own position yields `0`.
pub fn signed_yaw_to(pose: &Pose, target: Vec3) -> f32 {
    let to_target = target - pose.position;
    let from = Vec3::new(to_target.x, 0.0, to_target.z);
    let forward = pose.forward();

    let cross_y = from.z * forward.x - from.x * forward.z;
    let dot = from.x * forward.x + from.z * forward.z;
    if cross_y == 0.0 && dot == 0.0 {
        return 0.0;
    }

    let angle = cross_y.atan2(dot).to_degrees();
    if angle <= -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Nearest-target search and steering with configured limits.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    config: NavigationConfig,
}

impl Navigator {
    /// Creates a navigator with the given scan cutoff and dead band.
    pub fn new(config: NavigationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Finds the closest target the observing agent may go for.
    ///
    /// A target qualifies when it is not carried, is not resting in the
    /// agent's own base, and is strictly closer than the scan cutoff. On
    /// equal distances the earlier target in snapshot order wins.
    pub fn find_nearest_eligible_target<'a>(
        &self,
        snapshot: &'a WorldSnapshot,
    ) -> Option<&'a TargetDescriptor> {
        let agent = snapshot.agent();
        Self::nearest_eligible(
            &agent.pose,
            agent.team,
            snapshot.targets(),
            self.config.scan_cutoff,
        )
    }

    fn nearest_eligible<'a>(
        pose: &Pose,
        team: TeamId,
        targets: &'a [TargetDescriptor],
        cutoff: f32,
    ) -> Option<&'a TargetDescriptor> {
        let mut best_distance = cutoff;
        let mut nearest = None;

        for target in targets {
            let distance = pose.distance_to(target.position);
            if distance < best_distance && target.state.is_eligible_for(team) {
                best_distance = distance;
                nearest = Some(target);
            }
        }

        nearest
    }

    /// Chooses a turn or a forward move toward `target`.
    ///
    /// # Arguments
    ///
    /// * `pose` - Current pose of the steering agent
    /// * `target` - World position to head for; only its ground-plane part matters
    pub fn steer_toward(&self, pose: &Pose, target: Vec3) -> SteeringCommand {
        let angle = signed_yaw_to(pose, target);
        let band = self.config.deadband_degrees;
        if angle < -band {
            SteeringCommand::RotatePositive
        } else if angle > band {
            SteeringCommand::RotateNegative
        } else {
            SteeringCommand::MoveForward
        }
    }

    /// Steers toward the agent's own base.
    pub fn steer_to_base(&self, snapshot: &WorldSnapshot) -> SteeringCommand {
        self.steer_toward(&snapshot.agent().pose, snapshot.base().position)
    }

    /// Steers toward the nearest eligible target, if there is one.
    pub fn steer_to_nearest_target(&self, snapshot: &WorldSnapshot) -> Option<SteeringCommand> {
        self.find_nearest_eligible_target(snapshot)
            .map(|target| self.steer_toward(&snapshot.agent().pose, target.position))
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}
