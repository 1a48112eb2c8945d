//! Observation encoding.
//!
//! Turns a [`WorldSnapshot`] into the flat vector consumed by a policy:
//!
//! ```text
//! [vel_right, vel_forward]              2  velocity in the agent's frame
//! [time_remaining]                      1
//! [heading_degrees]                     1  in [0, 360)
//! [base_dir_x, base_dir_y, base_dir_z]  3  unit agent→base, agent's frame
//! [base_distance]                       1
//! per target:
//!   [dir_x, dir_y, dir_z]               3  unit agent→target, agent's frame
//!   [distance, carried_by, in_base]     3
//! [frozen]                              1  0 or 1
//! ```
//!
//! Length is therefore `9 + 6 × N` for `N` targets.

use crate::error::CoreError;
use crate::world::WorldSnapshot;

/// Encodes snapshots for a fixed number of targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationEncoder {
    target_count: usize,
}

impl ObservationEncoder {
    /// Scalars before the first target block.
    pub const HEADER_DIM: usize = 8;
    /// Scalars per target block.
    pub const TARGET_FEATURE_DIM: usize = 6;
    /// Scalars after the last target block (the frozen flag).
    pub const TRAILER_DIM: usize = 1;

    /// Creates an encoder for arenas holding `target_count` targets.
    pub fn new(target_count: usize) -> Self {
        Self { target_count }
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Observation length for this encoder.
    pub fn dim(&self) -> usize {
        observation_dim(self.target_count)
    }

    /// Offset of target `index`'s block inside an observation.
    pub fn target_offset(index: usize) -> usize {
        Self::HEADER_DIM + index * Self::TARGET_FEATURE_DIM
    }

    /// Encodes the snapshot.
    ///
    /// Identical snapshots always produce bit-identical vectors, and no
    /// element is ever NaN for finite inputs: coincident positions encode a
    /// zero direction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TargetCountMismatch`] if the snapshot does not
    /// hold exactly the configured number of targets.
    pub fn encode(&self, snapshot: &WorldSnapshot) -> Result<Vec<f32>, CoreError> {
        if snapshot.target_count() != self.target_count {
            return Err(CoreError::TargetCountMismatch {
                expected: self.target_count,
                actual: snapshot.target_count(),
            });
        }

        let agent = snapshot.agent();
        let pose = &agent.pose;
        let mut obs = Vec::with_capacity(self.dim());

        let local_velocity = pose.to_local(agent.velocity);
        obs.push(local_velocity.x);
        obs.push(local_velocity.z);

        obs.push(snapshot.time_remaining());
        obs.push(pose.heading_degrees());

        let base = snapshot.base().position;
        obs.extend(pose.local_direction_to(base).to_array());
        obs.push(pose.distance_to(base));

        for target in snapshot.targets() {
            obs.extend(pose.local_direction_to(target.position).to_array());
            obs.push(pose.distance_to(target.position));
            obs.push(target.state.carried_indicator());
            obs.push(target.state.in_base_indicator());
        }

        obs.push(if agent.frozen { 1.0 } else { 0.0 });

        debug_assert_eq!(obs.len(), self.dim());
        Ok(obs)
    }
}

/// Observation length for `target_count` targets: `9 + 6 × target_count`.
pub fn observation_dim(target_count: usize) -> usize {
    ObservationEncoder::HEADER_DIM
        + target_count * ObservationEncoder::TARGET_FEATURE_DIM
        + ObservationEncoder::TRAILER_DIM
}
