//! Named per-category reward accounting.
//!
//! Each agent owns one [`RewardLedger`] for the episode. A tick's shaped
//! reward is first collected into a [`RewardBreakdown`] and then folded into
//! the ledger, so category totals and the accumulated scalar always agree.

use super::events::RewardEvent;

/// Reward split by category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RewardBreakdown {
    pub frozen: f32,
    pub effect_use: f32,
    pub effect_hit: f32,
    pub effect_miss: f32,
    pub pickup: f32,
    pub delivery: f32,
    pub wall_collision: f32,
    pub opponent_collision: f32,
    pub speed_incentive: f32,
}

impl RewardBreakdown {
    /// Adds `delta` to the category of `event`.
    pub fn add_event(&mut self, event: RewardEvent, delta: f32) {
        let slot = match event {
            RewardEvent::EnteredFrozen => &mut self.frozen,
            RewardEvent::EffectUsed => &mut self.effect_use,
            RewardEvent::EffectHit => &mut self.effect_hit,
            RewardEvent::EffectMiss => &mut self.effect_miss,
            RewardEvent::TargetPickup => &mut self.pickup,
            RewardEvent::BaseDelivery => &mut self.delivery,
            RewardEvent::WallCollision => &mut self.wall_collision,
            RewardEvent::OpponentCollision => &mut self.opponent_collision,
        };
        *slot += delta;
    }

    /// Sum over all categories, always in the same order.
    pub fn total(&self) -> f32 {
        self.frozen
            + self.effect_use
            + self.effect_hit
            + self.effect_miss
            + self.pickup
            + self.delivery
            + self.wall_collision
            + self.opponent_collision
            + self.speed_incentive
    }

    fn merge(&mut self, other: &RewardBreakdown) {
        self.frozen += other.frozen;
        self.effect_use += other.effect_use;
        self.effect_hit += other.effect_hit;
        self.effect_miss += other.effect_miss;
        self.pickup += other.pickup;
        self.delivery += other.delivery;
        self.wall_collision += other.wall_collision;
        self.opponent_collision += other.opponent_collision;
        self.speed_incentive += other.speed_incentive;
    }
}

/// Episode-long reward record for one agent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RewardLedger {
    accumulated: f32,
    totals: RewardBreakdown,
    counts: [u32; RewardEvent::COUNT],
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one tick into the ledger and returns the new accumulated reward.
    pub fn record(&mut self, events: &[RewardEvent], tick: &RewardBreakdown) -> f32 {
        for event in events {
            self.counts[event.index()] += 1;
        }
        self.totals.merge(tick);
        self.accumulated += tick.total();
        self.accumulated
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn totals(&self) -> &RewardBreakdown {
        &self.totals
    }

    /// How many times `event` occurred this episode.
    pub fn count(&self, event: RewardEvent) -> u32 {
        self.counts[event.index()]
    }

    /// Clears everything for a new episode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
