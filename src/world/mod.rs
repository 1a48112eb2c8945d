//! World-facing types: snapshots, targets, bases and the entity registry.

pub mod registry;
pub mod snapshot;
pub mod types;

pub use registry::{EntityHandle, EntityKind, EntityRegistry};
pub use snapshot::{AgentView, WorldSnapshot};
pub use types::{unit_or_zero, BaseDescriptor, Pose, TargetDescriptor, TargetState, TeamId};
