//! Read-only world snapshot handed to an agent each tick.

use glam::Vec3;

use super::types::{BaseDescriptor, Pose, TargetDescriptor, TeamId};

/// The observing agent's own state for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub pose: Pose,
    /// Linear velocity in world space.
    pub velocity: Vec3,
    pub team: TeamId,
    pub frozen: bool,
    /// Number of targets the agent is currently carrying.
    pub carried: u32,
}

impl AgentView {
    /// Creates a stationary, unfrozen, empty-handed agent view.
    pub fn new(pose: Pose, team: TeamId) -> Self {
        Self {
            pose,
            velocity: Vec3::ZERO,
            team,
            frozen: false,
            carried: 0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    pub fn with_carried(mut self, carried: u32) -> Self {
        self.carried = carried;
        self
    }

    /// Magnitude of the agent's velocity.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Immutable view of the world from one agent's perspective.
///
/// Built by the host once per tick. Targets keep the host's iteration order,
/// which must be stable across ticks for observation slots to line up.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    agent: AgentView,
    base: BaseDescriptor,
    time_remaining: f32,
    targets: Vec<TargetDescriptor>,
}

impl WorldSnapshot {
    /// Creates a new snapshot.
    pub fn new(
        agent: AgentView,
        base: BaseDescriptor,
        time_remaining: f32,
        targets: Vec<TargetDescriptor>,
    ) -> Self {
        Self {
            agent,
            base,
            time_remaining,
            targets,
        }
    }

    pub fn agent(&self) -> &AgentView {
        &self.agent
    }

    /// The observing agent's own base.
    pub fn base(&self) -> &BaseDescriptor {
        &self.base
    }

    /// Remaining episode time as reported by the host timer.
    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn targets(&self) -> &[TargetDescriptor] {
        &self.targets
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}
