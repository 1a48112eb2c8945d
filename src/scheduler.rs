//! Tick scheduler driving arena agents against an external host.
//!
//! The host owns physics, spawning and timing. Each tick follows:
//! snapshot → observe → policy → act → apply intents → advance physics →
//! drain reports → settle rewards.

use log::debug;

use crate::action::Intent;
use crate::agent::{ArenaAgent, TickReward};
use crate::error::CoreError;
use crate::policy::Policy;
use crate::reward::WorldEvent;
use crate::world::{EntityRegistry, WorldSnapshot};

/// The external simulation the core runs against.
///
/// Agents are addressed by the slot index returned from
/// [`TickScheduler::add_agent`].
pub trait ArenaHost {
    /// Entity kinds registered for the current episode.
    fn registry(&self) -> &EntityRegistry;

    /// World as seen by the agent in `slot`, taken before physics advances.
    fn snapshot(&self, slot: usize) -> WorldSnapshot;

    /// Hands one agent's intent to the motion and effect collaborators.
    fn apply_intent(&mut self, slot: usize, intent: &Intent);

    /// Integrates motion and runs collision and probe queries.
    fn advance(&mut self);

    /// Reports gathered for `slot` during the last [`ArenaHost::advance`].
    fn drain_events(&mut self, slot: usize) -> Vec<WorldEvent>;

    /// Whether the episode timer has run out.
    fn episode_done(&self) -> bool;

    /// Restarts the world for a new episode.
    fn reset(&mut self);
}

/// Result of a single scheduler tick.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Per-agent observations the policies acted on.
    pub observations: Vec<Vec<f32>>,
    pub intents: Vec<Intent>,
    pub rewards: Vec<TickReward>,
    /// Whether the host reports the episode as finished.
    pub done: bool,
    /// Ticks completed this episode, including this one.
    pub tick: u32,
}

struct Slot {
    agent: ArenaAgent,
    policy: Box<dyn Policy>,
}

/// Runs every registered agent through one tick at a time.
pub struct TickScheduler {
    slots: Vec<Slot>,
    tick: u32,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            tick: 0,
        }
    }

    /// Registers an agent with its policy and returns its slot index.
    ///
    /// # Arguments
    ///
    /// * `agent` - Decision-and-reward state for the agent
    /// * `policy` - Policy choosing the agent's action every tick
    pub fn add_agent(&mut self, agent: ArenaAgent, policy: Box<dyn Policy>) -> usize {
        debug!(
            "Slot {} -> agent {} ({}) with policy {}",
            self.slots.len(),
            agent.id,
            agent.team(),
            policy.name()
        );
        self.slots.push(Slot { agent, policy });
        self.slots.len() - 1
    }

    pub fn n_agents(&self) -> usize {
        self.slots.len()
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn agent(&self, slot: usize) -> Option<&ArenaAgent> {
        self.slots.get(slot).map(|s| &s.agent)
    }

    pub fn agents(&self) -> impl Iterator<Item = &ArenaAgent> {
        self.slots.iter().map(|s| &s.agent)
    }

    /// Looks an agent up by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownAgent`] if no slot holds that id.
    pub fn agent_by_id(&self, id: &str) -> Result<&ArenaAgent, CoreError> {
        self.agents()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::UnknownAgent(id.to_string()))
    }

    /// Resets the host and every agent for a new episode.
    pub fn begin_episode<H: ArenaHost>(&mut self, host: &mut H) {
        host.reset();
        self.tick = 0;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let frozen = host.snapshot(i).agent().frozen;
            slot.agent.begin_episode(frozen);
        }
    }

    /// Executes one tick for every agent.
    ///
    /// Snapshots for all agents are taken before any intent is applied, so
    /// every agent decides and is rewarded against the same world state.
    ///
    /// # Errors
    ///
    /// Propagates [`CoreError::TargetCountMismatch`] from observation encoding.
    pub fn step<H: ArenaHost>(&mut self, host: &mut H) -> Result<StepResult, CoreError> {
        let snapshots: Vec<WorldSnapshot> =
            (0..self.slots.len()).map(|i| host.snapshot(i)).collect();

        let mut observations = Vec::with_capacity(self.slots.len());
        let mut intents = Vec::with_capacity(self.slots.len());
        for (slot, snapshot) in self.slots.iter_mut().zip(&snapshots) {
            let observation = slot.agent.observe(snapshot)?;
            let action = slot.policy.select_action(&observation);
            intents.push(slot.agent.act(snapshot, &action));
            observations.push(observation);
        }

        for (i, intent) in intents.iter().enumerate() {
            host.apply_intent(i, intent);
        }
        host.advance();

        let mut rewards = Vec::with_capacity(self.slots.len());
        for (i, (slot, snapshot)) in self.slots.iter_mut().zip(&snapshots).enumerate() {
            let reports = host.drain_events(i);
            rewards.push(slot.agent.settle(host.registry(), snapshot, &reports));
        }

        self.tick += 1;
        Ok(StepResult {
            observations,
            intents,
            rewards,
            done: host.episode_done(),
            tick: self.tick,
        })
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}
