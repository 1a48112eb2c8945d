//! Core value types for the arena world.
//!
//! Defines team identity, agent poses, and the per-target state used by
//! observation encoding and navigation.

use std::fmt;

use glam::{Quat, Vec3};

use super::registry::EntityHandle;

/// Team identifier as assigned by the host (teams are numbered from 1).
///
/// Encoded into observations as its raw number; `0` is reserved for "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamId(pub u8);

impl TeamId {
    /// Indicator value meaning "no team".
    pub const NONE: TeamId = TeamId(0);

    /// False for the reserved "none" value.
    pub fn is_assigned(&self) -> bool {
        *self != Self::NONE
    }

    /// Numeric indicator used in observation vectors.
    pub fn indicator(&self) -> f32 {
        f32::from(self.0)
    }

    /// True when `other` belongs to a different team.
    pub fn is_opponent(&self, other: TeamId) -> bool {
        *self != other
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {}", self.0)
    }
}

/// Returns the unit vector along `v`, or zero when `v` has no direction.
///
/// Zero-length and non-finite inputs both map to [`Vec3::ZERO`] so no NaN
/// can leak into an observation.
pub fn unit_or_zero(v: Vec3) -> Vec3 {
    if !v.is_finite() {
        return Vec3::ZERO;
    }
    v.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Position plus yaw of an entity standing on the arena floor.
///
/// The arena is Y-up. Yaw is measured in degrees about +Y, so a yaw of
/// `θ` faces `(sin θ, 0, cos θ)` and has its right hand at
/// `(cos θ, 0, -sin θ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

impl Pose {
    /// Creates a new pose.
    pub fn new(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees,
        }
    }

    /// World rotation of this pose.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees.to_radians())
    }

    /// Unit forward axis in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Unit right axis in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Expresses a world-space direction in this pose's local frame.
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation().inverse() * world
    }

    /// Heading in degrees, wrapped into `[0, 360)`.
    pub fn heading_degrees(&self) -> f32 {
        let wrapped = self.yaw_degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 360.0 {
            0.0
        } else {
            wrapped
        }
    }

    /// Euclidean distance to a world position.
    pub fn distance_to(&self, target: Vec3) -> f32 {
        self.position.distance(target)
    }

    /// Unit direction from this pose toward `target`, in the local frame.
    pub fn local_direction_to(&self, target: Vec3) -> Vec3 {
        unit_or_zero(self.to_local(target - self.position))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }
}

/// Where a target currently is.
///
/// A target is free, carried, or resting in a base; never two at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetState {
    Free,
    Carried(TeamId),
    InBase(TeamId),
}

impl TargetState {
    /// Carried-by indicator: the carrying team's number, or `0`.
    pub fn carried_indicator(&self) -> f32 {
        match self {
            TargetState::Carried(team) => team.indicator(),
            _ => 0.0,
        }
    }

    /// In-base indicator: the owning team of the base it rests in, or `0`.
    pub fn in_base_indicator(&self) -> f32 {
        match self {
            TargetState::InBase(team) => team.indicator(),
            _ => 0.0,
        }
    }

    /// True if an agent of `team` may go for this target.
    ///
    /// Carried targets and targets already in `team`'s own base are excluded.
    pub fn is_eligible_for(&self, team: TeamId) -> bool {
        match self {
            TargetState::Free => true,
            TargetState::Carried(_) => false,
            TargetState::InBase(owner) => *owner != team,
        }
    }
}

/// A target as seen in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDescriptor {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub state: TargetState,
}

impl TargetDescriptor {
    /// Creates a new target descriptor.
    pub fn new(handle: EntityHandle, position: Vec3, state: TargetState) -> Self {
        Self {
            handle,
            position,
            state,
        }
    }
}

/// A team base. Immutable for the duration of an episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseDescriptor {
    pub position: Vec3,
    pub team: TeamId,
}

impl BaseDescriptor {
    /// Creates a new base descriptor.
    pub fn new(position: Vec3, team: TeamId) -> Self {
        Self { position, team }
    }
}
