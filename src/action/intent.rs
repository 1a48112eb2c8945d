//! Action selections and the intents they resolve to.

use glam::Vec3;

use crate::error::CoreError;
use crate::navigation::SteeringCommand;
use crate::world::{EntityHandle, Pose};

/// The 5-slot discrete action produced by a policy each tick.
///
/// | slot | field | values |
/// |---|---|---|
/// | 0 | `forward_axis` | 0 none, 1 forward, 2 backward |
/// | 1 | `rotate_axis` | 0 none, 1 right, 2 left |
/// | 2 | `effect_axis` | 1 effect on, else off |
/// | 3 | `go_to_target` | 1 steer to nearest eligible target |
/// | 4 | `go_to_base` | 1 steer to own base |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSelection {
    pub forward_axis: i32,
    pub rotate_axis: i32,
    pub effect_axis: i32,
    pub go_to_target: i32,
    pub go_to_base: i32,
}

impl ActionSelection {
    /// Number of discrete slots.
    pub const SLOTS: usize = 5;

    /// Number of choices per slot, as sampled by policies.
    pub const BRANCH_SIZES: [i32; Self::SLOTS] = [3, 3, 2, 2, 2];

    /// The all-zero selection: no movement, no effect, no navigation.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Builds a selection from its slot array.
    pub fn from_slots(slots: [i32; Self::SLOTS]) -> Self {
        Self {
            forward_axis: slots[0],
            rotate_axis: slots[1],
            effect_axis: slots[2],
            go_to_target: slots[3],
            go_to_base: slots[4],
        }
    }

    /// Builds a selection from a slice coming off a policy output buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ActionSizeMismatch`] unless exactly five slots are given.
    pub fn try_from_slice(slots: &[i32]) -> Result<Self, CoreError> {
        let array: [i32; Self::SLOTS] =
            slots
                .try_into()
                .map_err(|_| CoreError::ActionSizeMismatch {
                    expected: Self::SLOTS,
                    actual: slots.len(),
                })?;
        Ok(Self::from_slots(array))
    }

    pub fn to_slots(&self) -> [i32; Self::SLOTS] {
        [
            self.forward_axis,
            self.rotate_axis,
            self.effect_axis,
            self.go_to_target,
            self.go_to_base,
        ]
    }
}

/// Translation intent along the agent's forward axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Movement {
    #[default]
    None,
    Forward,
    Backward,
}

impl Movement {
    /// World-space direction to move in for the given pose.
    pub fn direction(&self, pose: &Pose) -> Vec3 {
        match self {
            Movement::None => Vec3::ZERO,
            Movement::Forward => pose.forward(),
            Movement::Backward => -pose.forward(),
        }
    }
}

/// Yaw rotation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    /// Positive yaw.
    Right,
    /// Negative yaw.
    Left,
}

impl Rotation {
    /// Rotation axis for the motion integrator: `+Y`, `-Y` or zero.
    pub fn axis(&self) -> Vec3 {
        match self {
            Rotation::None => Vec3::ZERO,
            Rotation::Right => Vec3::Y,
            Rotation::Left => Vec3::NEG_Y,
        }
    }
}

/// Where the navigation slots sent the agent this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationGoal {
    Target(EntityHandle),
    Base,
}

/// Forward sweep the host should run while the targeting effect is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRequest {
    pub origin: Vec3,
    /// Unit forward direction of the sweep.
    pub direction: Vec3,
    pub radius: f32,
    pub range: f32,
}

/// Concrete per-tick intent handed to the motion and effect collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    pub movement: Movement,
    pub rotation: Rotation,
    pub effect_on: bool,
    /// Set only when the effect is on and the agent is not frozen.
    pub probe: Option<ProbeRequest>,
    pub navigation: Option<NavigationGoal>,
}

impl Intent {
    /// Applies a steering decision, replacing only the component it asserts.
    pub fn apply_steering(&mut self, command: SteeringCommand) {
        match command {
            SteeringCommand::RotatePositive => self.rotation = Rotation::Right,
            SteeringCommand::RotateNegative => self.rotation = Rotation::Left,
            SteeringCommand::MoveForward => self.movement = Movement::Forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_round_trip_through_fields() {
        let slots = [2, 1, 1, 0, 1];
        let action = ActionSelection::from_slots(slots);
        assert_eq!(action.forward_axis, 2);
        assert_eq!(action.go_to_base, 1);
        assert_eq!(action.to_slots(), slots);
    }

    #[test]
    fn try_from_slice_checks_arity() {
        assert!(ActionSelection::try_from_slice(&[0, 0, 0, 0, 0]).is_ok());
        let err = ActionSelection::try_from_slice(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            CoreError::ActionSizeMismatch {
                expected: 5,
                actual: 3
            }
        );
    }

    #[test]
    fn movement_directions_follow_pose() {
        let pose = Pose::new(Vec3::ZERO, 90.0);
        assert!((Movement::Forward.direction(&pose) - Vec3::X).length() < 1e-5);
        assert!((Movement::Backward.direction(&pose) + Vec3::X).length() < 1e-5);
        assert_eq!(Movement::None.direction(&pose), Vec3::ZERO);
    }

    #[test]
    fn steering_overwrites_one_component() {
        let mut intent = Intent {
            movement: Movement::Backward,
            rotation: Rotation::Left,
            ..Intent::default()
        };
        intent.apply_steering(SteeringCommand::RotatePositive);
        assert_eq!(intent.rotation, Rotation::Right);
        assert_eq!(intent.movement, Movement::Backward);

        intent.apply_steering(SteeringCommand::MoveForward);
        assert_eq!(intent.movement, Movement::Forward);
        assert_eq!(intent.rotation, Rotation::Right);
    }
}
