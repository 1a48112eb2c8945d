//! capture_arena - per-tick decision and reward core for capture-and-return arena agents.
//!
//! Agents roam a bounded arena, collect targets, ferry them to their team
//! base and can freeze opponents with a forward targeting effect. This crate
//! turns a host-provided world snapshot into an observation vector, resolves
//! a discrete action into movement and effect intents, and shapes rewards
//! from the events the host reports back. Physics, rendering and training
//! live in the host.

pub mod action;
pub mod agent;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod navigation;
pub mod observation;
pub mod policy;
pub mod reward;
pub mod scheduler;
pub mod world;

pub use action::{ActionDecoder, ActionSelection, Intent, Movement, Rotation};
pub use agent::{ArenaAgent, TickReward};
pub use config::ArenaConfig;
pub use error::CoreError;
pub use logging::init as init_logging;
pub use observation::{observation_dim, ObservationEncoder};
pub use scheduler::{ArenaHost, StepResult, TickScheduler};

/// Identifier type used for agents.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
