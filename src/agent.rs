//! Per-agent tick driver.
//!
//! One [`ArenaAgent`] per controlled agent. A tick runs in three calls:
//!
//! 1. [`ArenaAgent::observe`] encodes the snapshot for the policy.
//! 2. [`ArenaAgent::act`] resolves the policy's selection into an [`Intent`].
//! 3. [`ArenaAgent::settle`] folds the host's world reports into the reward.
//!
//! All three take the same tick snapshot.

use log::{debug, trace};

use crate::action::{ActionDecoder, ActionSelection, Intent};
use crate::config::ArenaConfig;
use crate::error::CoreError;
use crate::navigation::Navigator;
use crate::observation::ObservationEncoder;
use crate::reward::{
    classify, FrozenTracker, RewardBreakdown, RewardEvent, RewardLedger, RewardShaper,
    TickContext, WorldEvent,
};
use crate::world::{EntityRegistry, TeamId, WorldSnapshot};
use crate::Id;

/// Reward outcome of one settled tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReward {
    /// Events that fired this tick, frozen edge first.
    pub events: Vec<RewardEvent>,
    pub breakdown: RewardBreakdown,
    /// Reward added this tick.
    pub delta: f32,
    /// Accumulated reward after this tick.
    pub accumulated: f32,
}

/// Decision-and-reward state of one agent.
#[derive(Debug, Clone)]
pub struct ArenaAgent {
    /// Unique identifier for this agent.
    pub id: Id,
    team: TeamId,
    encoder: ObservationEncoder,
    decoder: ActionDecoder,
    shaper: RewardShaper,
    frozen: FrozenTracker,
    ledger: RewardLedger,
    /// Effect state from this tick's `act`, consumed by `settle`.
    effect_active: bool,
}

impl ArenaAgent {
    /// Creates an agent for an arena with `target_count` targets.
    ///
    /// # Arguments
    ///
    /// * `team` - Team the agent plays for; must not be [`TeamId::NONE`]
    /// * `target_count` - Number of targets every snapshot will carry
    /// * `config` - Reward, navigation and probe settings
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ReservedTeam`] for team `0` and
    /// [`CoreError::InvalidConfig`] if `config` fails validation.
    pub fn new(team: TeamId, target_count: usize, config: &ArenaConfig) -> Result<Self, CoreError> {
        if !team.is_assigned() {
            return Err(CoreError::ReservedTeam);
        }
        config.validate()?;
        Ok(Self {
            id: crate::generate_id(),
            team,
            encoder: ObservationEncoder::new(target_count),
            decoder: ActionDecoder::new(
                Navigator::new(config.navigation.clone()),
                config.probe.clone(),
            ),
            shaper: RewardShaper::new(config.rewards.clone(), config.speed_incentive.clone()),
            frozen: FrozenTracker::default(),
            ledger: RewardLedger::new(),
            effect_active: false,
        })
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn encoder(&self) -> &ObservationEncoder {
        &self.encoder
    }

    pub fn ledger(&self) -> &RewardLedger {
        &self.ledger
    }

    pub fn accumulated_reward(&self) -> f32 {
        self.ledger.accumulated()
    }

    /// Resets per-episode state. `initially_frozen` seeds the edge detector.
    pub fn begin_episode(&mut self, initially_frozen: bool) {
        self.frozen.reset(initially_frozen);
        self.ledger.reset();
        self.effect_active = false;
        debug!("Agent {} ({}) starting episode", self.id, self.team);
    }

    /// Encodes the observation for this tick.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TargetCountMismatch`] if the snapshot's target
    /// list does not match the arena this agent was built for.
    pub fn observe(&self, snapshot: &WorldSnapshot) -> Result<Vec<f32>, CoreError> {
        self.encoder.encode(snapshot)
    }

    /// Resolves the policy's action into this tick's intent.
    pub fn act(&mut self, snapshot: &WorldSnapshot, action: &ActionSelection) -> Intent {
        self.debug_check_team(snapshot);
        let intent = self.decoder.decode(snapshot, action);
        self.effect_active = intent.effect_on;
        trace!("Agent {} intent {:?}", self.id, intent);
        intent
    }

    /// Computes this tick's reward from the frozen edge and world reports.
    ///
    /// # Arguments
    ///
    /// * `registry` - Entity kinds used to classify contact reports
    /// * `snapshot` - The same pre-advance snapshot given to `observe` and `act`
    /// * `reports` - World events the host gathered for this agent this tick
    pub fn settle(
        &mut self,
        registry: &EntityRegistry,
        snapshot: &WorldSnapshot,
        reports: &[WorldEvent],
    ) -> TickReward {
        self.debug_check_team(snapshot);
        let agent = snapshot.agent();

        let mut events: Vec<RewardEvent> = self.frozen_transition(snapshot).into_iter().collect();
        let context = TickContext::from_snapshot(snapshot, self.effect_active);
        events.extend(classify(registry, snapshot, context, reports));
        self.effect_active = false;

        let breakdown = self.shaper.shape(&events, agent.carried, agent.speed());
        let delta = breakdown.total();
        let accumulated = self.ledger.record(&events, &breakdown);

        if events.contains(&RewardEvent::BaseDelivery) {
            debug!(
                "Agent {} touched own base carrying {} target(s)",
                self.id, agent.carried
            );
        }

        TickReward {
            events,
            breakdown,
            delta,
            accumulated,
        }
    }

    fn debug_check_team(&self, snapshot: &WorldSnapshot) {
        debug_assert_eq!(
            snapshot.agent().team,
            self.team,
            "snapshot was taken for another team's agent"
        );
    }

    /// Per-tick default step: detect the frozen edge before anything else.
    fn frozen_transition(&mut self, snapshot: &WorldSnapshot) -> Option<RewardEvent> {
        let entered = self.frozen.observe(snapshot.agent().frozen);
        if entered {
            debug!("Agent {} became frozen", self.id);
        }
        entered.then_some(RewardEvent::EnteredFrozen)
    }
}
